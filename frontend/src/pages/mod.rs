pub mod automation_builder;
pub mod automations;
pub mod calendar;
pub mod contacts;
pub mod dashboard;
pub mod funnel_builder;
pub mod funnels;
pub mod opportunities;
