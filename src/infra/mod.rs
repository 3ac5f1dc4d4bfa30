pub mod powerschool;
