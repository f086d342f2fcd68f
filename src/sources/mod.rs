pub mod census;
pub mod cms;
pub mod hrsa;
pub mod places;
