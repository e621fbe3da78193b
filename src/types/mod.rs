pub mod pet_model;
pub mod region;
pub mod time_scale;
pub mod variable;
