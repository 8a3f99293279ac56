// Domain-layer modules and shared errors/models
pub mod lead_intake {
    pub use crate::lead_intake::*;
}

pub mod models {
    pub use crate::models::*;
}

pub mod outcome {
    pub use crate::outcome::*;
}

pub mod services {
    pub use crate::services::*;
}

pub mod errors {
    pub use crate::errors::*;
}
