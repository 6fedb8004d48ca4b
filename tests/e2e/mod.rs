// End-to-end tests for the voxtag HTTP API
//
// Each test starts the real router on an ephemeral port, backed by a
// scripted in-process synthesis backend and a temporary output directory.
// Nothing leaves the machine, so tests run in parallel.

mod helpers;
mod test_health;
