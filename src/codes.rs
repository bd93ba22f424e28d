//! Random short code generation.

/// Character set for generating short codes.
pub const ALPHABET: &[char] = &[
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M',
    'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm',
    'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// Length of every generated short code. 62^6 gives roughly 56.8 billion
/// possible codes, so random collisions stay negligible at realistic
/// store sizes.
pub const CODE_LENGTH: usize = 6;

/// Generate a random short code of [`CODE_LENGTH`] characters, each drawn
/// uniformly from [`ALPHABET`].
///
/// The generator is pure: uniqueness against already-stored codes is the
/// caller's concern (see `service::Shortener::shorten`).
pub fn generate() -> String {
    nanoid::nanoid!(CODE_LENGTH, ALPHABET)
}
