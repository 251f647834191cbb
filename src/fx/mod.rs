pub mod spark;
