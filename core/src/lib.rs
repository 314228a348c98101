pub mod agent;
pub mod behavior;
pub mod clock;
pub mod collector;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod firm_agent;
pub mod generator;
pub mod government_agent;
pub mod individual_agent;
pub mod job_board;
pub mod population;
pub mod region_agent;
pub mod registry;
pub mod rng;
pub mod scheduler;
pub mod store;
pub mod types;
pub mod world;
