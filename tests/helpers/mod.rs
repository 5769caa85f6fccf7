pub mod db;
pub mod fakes;
