//! Locations and the two relations users hold on them: membership and
//! pending invitation.

pub mod invitation;
pub mod membership;
pub mod model;

pub use invitation::{Invitation, LocationInvite, UserInvite};
pub use membership::{LocationMember, Membership, UserLocation};
pub use model::{CreateLocation, Location};
