//! Shared constants for end-to-end tests
//!
//! When test data changes (user credentials, catalog ids, etc.),
//! update only this file.

#![allow(dead_code)]

// ============================================================================
// Test User Credentials
// ============================================================================

/// Main test user handle
pub const TEST_USER: &str = "testuser";

/// Password shared by every seeded user
pub const TEST_PASS: &str = "testpass123";

/// Users followed by the main test user in the social tests
pub const FRIEND_1: &str = "friend1";
pub const FRIEND_2: &str = "friend2";

/// User with no relationships at all
pub const LONER: &str = "loner";

// ============================================================================
// Test Catalog IDs
// ============================================================================

/// "The Test Band", rock and indie
pub const ARTIST_1_ID: &str = "artist-1";

/// "Jazz Ensemble", jazz only
pub const ARTIST_2_ID: &str = "artist-2";

/// "Indie Collective", rock and indie
pub const ARTIST_3_ID: &str = "artist-3";

/// "First Album" by The Test Band, rock + indie, 45 minutes
pub const ALBUM_1_ID: &str = "album-1";

/// "Jazz Collection" by Jazz Ensemble, jazz, 60 minutes
pub const ALBUM_2_ID: &str = "album-2";

/// "Second Album" by The Test Band, rock, 30 minutes
pub const ALBUM_3_ID: &str = "album-3";

/// "Third Album" by The Test Band, indie, 35 minutes
pub const ALBUM_4_ID: &str = "album-4";

/// "Collective One" by Indie Collective, rock, 40 minutes
pub const ALBUM_5_ID: &str = "album-5";

/// "Collective Two" by Indie Collective, indie, no duration
pub const ALBUM_6_ID: &str = "album-6";

pub const ALBUM_1_DURATION: u64 = 45;

pub const ALL_ALBUM_IDS: [&str; 6] = [
    ALBUM_1_ID, ALBUM_2_ID, ALBUM_3_ID, ALBUM_4_ID, ALBUM_5_ID, ALBUM_6_ID,
];

// ============================================================================
// Timeouts
// ============================================================================

/// Maximum time to wait for the server to start
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Poll interval while waiting for the server
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 20;

/// Timeout of a single request
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
