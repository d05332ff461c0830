//! Interactive terminal views.

pub mod task_list;
