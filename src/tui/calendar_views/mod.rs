pub mod month;
pub mod deadline_list;
