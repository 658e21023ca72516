//! Núcleo de una agencia de transporte: estaciones, flota, conductores,
//! viajes y esquemas de asientos servidos por HTTP.

pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
