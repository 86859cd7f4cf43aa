pub mod alternatives;
pub mod booking;
pub mod conversation;
pub mod extract;
pub mod negotiation;
pub mod normalize;
pub mod oracle;
