pub mod api_crm;
pub mod api_funnels;
pub mod api_workflows;
