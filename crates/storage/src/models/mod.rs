mod fitness_log;

pub use fitness_log::FitnessLogEntry;
