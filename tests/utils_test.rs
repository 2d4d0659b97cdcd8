use spoctl::types::RepeatMode;
use spoctl::utils::*;

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    // Should not be empty
    assert!(!challenge.is_empty());

    // Should be deterministic - same input produces same output
    let challenge2 = generate_code_challenge(verifier);
    assert_eq!(challenge, challenge2);

    // Different input should produce different output
    let challenge3 = generate_code_challenge("different_verifier");
    assert_ne!(challenge, challenge3);

    // Should be base64-encoded (URL-safe, no padding)
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_code_challenge_known_vector() {
    // Reference verifier/challenge pair from RFC 7636 (appendix B)
    let verifier = "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk";
    let challenge = generate_code_challenge(verifier);

    assert_eq!(challenge, "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");
}

#[test]
fn test_generate_state_token() {
    let state = generate_state_token();

    // Should be exactly 16 characters, alphanumeric only
    assert_eq!(state.len(), 16);
    assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated tokens should be different
    let state2 = generate_state_token();
    assert_ne!(state, state2);
}

#[test]
fn test_clamp_position() {
    // Within range stays untouched
    assert_eq!(clamp_position(1_000, 3_000), 1_000);

    // Past the end clamps to the duration
    assert_eq!(clamp_position(5_000, 3_000), 3_000);

    // Exactly at the end is allowed
    assert_eq!(clamp_position(3_000, 3_000), 3_000);

    // Unknown duration collapses the position
    assert_eq!(clamp_position(5_000, 0), 0);
}

#[test]
fn test_parse_position() {
    // Bare seconds
    assert_eq!(parse_position("90").unwrap(), 90_000);

    // MM:SS
    assert_eq!(parse_position("1:30").unwrap(), 90_000);

    // H:MM:SS
    assert_eq!(parse_position("1:02:03").unwrap(), 3_723_000);

    // Zero works
    assert_eq!(parse_position("0").unwrap(), 0);

    // Invalid inputs
    assert!(parse_position("").is_err());
    assert!(parse_position("  ").is_err());
    assert!(parse_position("abc").is_err());
    assert!(parse_position("1:xx").is_err());
}

#[test]
fn test_format_duration() {
    assert_eq!(format_duration(0), "0:00");
    assert_eq!(format_duration(65_000), "1:05");
    assert_eq!(format_duration(600_000), "10:00");
    // Sub-second remainders truncate
    assert_eq!(format_duration(1_999), "0:01");
}

#[test]
fn test_parse_toggle() {
    assert_eq!(parse_toggle("on").unwrap(), true);
    assert_eq!(parse_toggle("Off").unwrap(), false);
    assert_eq!(parse_toggle("true").unwrap(), true);
    assert_eq!(parse_toggle("false").unwrap(), false);
    assert_eq!(parse_toggle("1").unwrap(), true);
    assert_eq!(parse_toggle("0").unwrap(), false);

    let result = parse_toggle("maybe");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("invalid value 'maybe'"));
}

#[test]
fn test_repeat_mode_roundtrip() {
    // Display names match the provider's repeat states
    assert_eq!(RepeatMode::Off.to_string(), "off");
    assert_eq!(RepeatMode::Context.to_string(), "context");
    assert_eq!(RepeatMode::Track.to_string(), "track");

    // Parsing accepts the same names
    assert_eq!("off".parse::<RepeatMode>().unwrap(), RepeatMode::Off);
    assert_eq!("Context".parse::<RepeatMode>().unwrap(), RepeatMode::Context);
    assert_eq!("track".parse::<RepeatMode>().unwrap(), RepeatMode::Track);
    assert!("loop".parse::<RepeatMode>().is_err());

    // API mapping falls back to off for unknown values
    assert_eq!(RepeatMode::from_api("context"), RepeatMode::Context);
    assert_eq!(RepeatMode::from_api("track"), RepeatMode::Track);
    assert_eq!(RepeatMode::from_api("off"), RepeatMode::Off);
    assert_eq!(RepeatMode::from_api("unknown"), RepeatMode::Off);
}

#[test]
fn test_search_kinds_default() {
    let default_kinds = SearchKinds::default();
    let collected: Vec<SearchKind> = default_kinds.iter().collect();
    assert_eq!(collected, vec![SearchKind::Track]);
}

#[test]
fn test_search_kinds_display() {
    // Single kind
    let kinds = parse_search_kinds("album").unwrap();
    assert_eq!(kinds.to_string(), "album");

    // Multiple kinds are sorted (declaration order) and comma-joined
    let kinds = parse_search_kinds("playlist,track,album").unwrap();
    assert_eq!(kinds.to_string(), "track,album,playlist");
}

#[test]
fn test_parse_search_kinds_valid_inputs() {
    // Single kind
    let result = parse_search_kinds("track").unwrap();
    let kinds: Vec<SearchKind> = result.iter().collect();
    assert_eq!(kinds, vec![SearchKind::Track]);

    // Multiple kinds
    let result = parse_search_kinds("track,album").unwrap();
    let kinds: Vec<SearchKind> = result.iter().collect();
    assert_eq!(kinds, vec![SearchKind::Track, SearchKind::Album]);

    // "all" keyword
    let result = parse_search_kinds("all").unwrap();
    let kinds: Vec<SearchKind> = result.iter().collect();
    assert_eq!(kinds.len(), 4);
    assert!(kinds.contains(&SearchKind::Track));
    assert!(kinds.contains(&SearchKind::Album));
    assert!(kinds.contains(&SearchKind::Artist));
    assert!(kinds.contains(&SearchKind::Playlist));

    // Spaces, plural forms and mixed case are tolerated
    let result = parse_search_kinds("Tracks, ALBUMS").unwrap();
    let kinds: Vec<SearchKind> = result.iter().collect();
    assert_eq!(kinds, vec![SearchKind::Track, SearchKind::Album]);
}

#[test]
fn test_parse_search_kinds_invalid_inputs() {
    // Empty string
    let result = parse_search_kinds("");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("cannot be empty"));

    // Whitespace only
    let result = parse_search_kinds("   ");
    assert!(result.is_err());

    // Invalid kind
    let result = parse_search_kinds("podcast");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("invalid value 'podcast'"));

    // Empty segment
    let result = parse_search_kinds("track,,album");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("empty segment"));
}

#[test]
fn test_parse_search_kinds_deduplication() {
    let result = parse_search_kinds("track,track,album").unwrap();
    let kinds: Vec<SearchKind> = result.iter().collect();
    assert_eq!(kinds, vec![SearchKind::Track, SearchKind::Album]);
}

#[test]
fn test_search_kind_all_constant() {
    assert_eq!(SearchKind::ALL.len(), 4);
    assert!(SearchKind::ALL.contains(&SearchKind::Track));
    assert!(SearchKind::ALL.contains(&SearchKind::Album));
    assert!(SearchKind::ALL.contains(&SearchKind::Artist));
    assert!(SearchKind::ALL.contains(&SearchKind::Playlist));
}
