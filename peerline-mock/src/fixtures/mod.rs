pub mod closes;
