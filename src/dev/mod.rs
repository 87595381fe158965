/// Development utilities module
///
/// Fixture-backed stats source for running the viewer offline.

pub mod mock_source;
