/// Database model definitions.
pub mod models;
/// Quiz, team, and score storage backends.
pub mod quiz_store;
/// Storage abstraction layer for database operations.
pub mod storage;
