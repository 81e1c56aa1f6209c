pub mod controller;
pub mod domain;
pub mod library;
pub mod repository;
