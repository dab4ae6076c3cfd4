pub mod channel;
pub mod generator;
pub mod reading;

pub use channel::{ReadingField, SensorChannel};
pub use generator::ReadingGenerator;
pub use reading::{SensorReading, WeatherReading};
