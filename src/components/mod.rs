pub mod badge;
