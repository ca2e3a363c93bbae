pub mod app_config;
pub mod db;
pub mod middleware;
pub mod orm;
pub mod question;
pub mod vote;
pub mod web;
