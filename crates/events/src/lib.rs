//! Outbound notifications for new public submissions.
//!
//! [`notice::SubmissionNotice`] renders what moderators are told about a
//! submission; [`delivery::email::EmailDelivery`] sends it over SMTP.

pub mod delivery;
pub mod notice;
