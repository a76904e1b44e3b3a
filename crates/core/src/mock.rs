pub mod collaborators;

pub use collaborators::{
    FixedClock, MockAppointmentStore, MockIdentityProvider, MockMailer, MockNotifier,
    MockUserDirectory,
};
