#![allow(dead_code)]

pub mod db;
pub mod logs;
pub mod trips;
