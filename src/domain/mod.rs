pub mod extraction;
pub mod org_record;
