pub mod select;

pub use select::{collect_options, trigger_class_name, NativeOption, Select, SelectNode};
