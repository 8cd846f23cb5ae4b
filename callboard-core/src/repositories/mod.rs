pub mod postgres;

pub use postgres::analytics::PostgresAnalyticsRepository;
