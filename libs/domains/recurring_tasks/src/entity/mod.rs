pub mod recurring_task;
pub mod reset_execution;

pub use recurring_task::{ActiveModel, Column, Entity, Model};
