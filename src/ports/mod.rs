mod postman_client;
mod spec_source;

pub use postman_client::{
    CreateSpecRequest, GenerationOptions, GenerationRequest, PostmanApi, SpecFile,
};
pub use spec_source::SpecSource;
