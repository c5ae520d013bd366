pub mod investing;
