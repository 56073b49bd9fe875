pub mod census;
