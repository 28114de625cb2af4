//! Environment-driven tunables, mirroring the donor config loader's
//! "parse the env var, or fall back to the default" behavior for every
//! knob instead of failing the process on a bad value.

use std::env;

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(default)
}

#[derive(Clone, Debug)]
pub struct Config {
    pub max_robots: usize,
    pub max_width: i32,
    pub max_height: i32,

    pub ga_population: usize,
    pub ga_generations: u32,
    pub ga_mutation_rate: f64,

    pub local_search_iterations: u32,

    pub csp_max_offset: u32,
    pub csp_horizon_buffer: i64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            max_robots: env_or("MAX_ROBOTS", 5),
            max_width: env_or("MAX_WIDTH", 200),
            max_height: env_or("MAX_HEIGHT", 200),

            ga_population: env_or("GA_DEFAULT_POPULATION", 40),
            ga_generations: env_or("GA_DEFAULT_GENERATIONS", 80),
            ga_mutation_rate: env_or("GA_DEFAULT_MUTATION_RATE", 0.3),

            local_search_iterations: env_or("LOCAL_SEARCH_DEFAULT_ITERATIONS", 2000),

            csp_max_offset: env_or("CSP_MAX_OFFSET", 40),
            csp_horizon_buffer: env_or("CSP_HORIZON_BUFFER", 10),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
