pub mod transcript_api;
