pub mod fitness_log;
