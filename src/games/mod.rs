pub mod hex_flip;
