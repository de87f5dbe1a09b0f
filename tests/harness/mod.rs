#![allow(dead_code, unused_imports)]

pub(crate) mod fake_keygen;
pub(crate) mod test_context;

pub(crate) use fake_keygen::FakeKeygen;
pub(crate) use test_context::TestContext;
