pub mod statement;
pub use statement::*;

pub mod projection;
pub use projection::*;

pub mod table_source;
pub use table_source::*;

pub mod join;
pub use join::*;

pub mod condition;
pub use condition::*;

pub mod value_expr;
pub use value_expr::*;

pub mod column;
pub use column::*;

pub mod operators;
pub use operators::*;

pub mod literal;
pub use literal::*;

pub mod group_by;
pub use group_by::*;

pub mod order_by;
pub use order_by::*;
