pub mod delegation;
