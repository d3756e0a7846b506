pub mod domain;
pub mod error;
pub mod form;
pub mod listing;
pub mod traits;

pub use domain::*;
pub use error::*;
pub use form::{FieldErrors, FormField, PetUpdateForm, SubmitButton, SubmitError};
pub use listing::{
    Completion, FetchTicket, ListingLoop, ListingPhase, ListingView, PageRequest, PageSizing,
    CONTINUATION_PAGE_SIZE, INITIAL_PAGE_SIZE,
};
pub use traits::*;
