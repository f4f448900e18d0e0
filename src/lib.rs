//! Closed-loop hiking routes from a place name.
//!
//! A start point is geocoded with OS Names, turned into an offset-and-return
//! waypoint list, routed with openrouteservice, and served as GeoJSON, GPX or
//! a Leaflet map.

pub mod api;
pub mod config;
pub mod convert;
pub mod geo;
pub mod html;
