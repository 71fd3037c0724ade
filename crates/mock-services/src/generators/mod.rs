//! 生成器模块

pub mod data_generator;

pub use data_generator::{DataGenerator, GenerationStats, GeneratorConfig};
