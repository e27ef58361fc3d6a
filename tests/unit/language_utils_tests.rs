/*!
 * Tests for language utilities
 */

use tarjama::language_utils::{Direction, Language, LanguagePair, get_language_name, parse_language};

#[test]
fn test_parse_language_withCodesAndNames_shouldResolve() {
    for input in ["ar", "ara", "Arabic", "ARABIC", " ar "] {
        assert_eq!(parse_language(input).unwrap(), Language::Arabic, "input {:?}", input);
    }
    for input in ["en", "eng", "English", "english"] {
        assert_eq!(parse_language(input).unwrap(), Language::English, "input {:?}", input);
    }
}

#[test]
fn test_parse_language_withOtherIsoLanguage_shouldNameIt() {
    let error = parse_language("fr").unwrap_err().to_string();
    assert!(error.contains("Unsupported language"));
    assert!(error.contains("French"));
}

#[test]
fn test_parse_language_withGarbage_shouldFail() {
    assert!(parse_language("").is_err());
    assert!(parse_language("xx").is_err());
    assert!(parse_language("klingonese").is_err());
}

#[test]
fn test_get_language_name_withValidCode_shouldReturnName() {
    assert_eq!(get_language_name("ar").unwrap(), "Arabic");
    assert_eq!(get_language_name("deu").unwrap(), "German");
    assert!(get_language_name("zz").is_err());
}

#[test]
fn test_languagePair_direction_shouldOnlyExistForCrossPairs() {
    let ar_en = LanguagePair::new(Language::Arabic, Language::English);
    let en_ar = LanguagePair::new(Language::English, Language::Arabic);
    let ar_ar = LanguagePair::new(Language::Arabic, Language::Arabic);
    let en_en = LanguagePair::new(Language::English, Language::English);

    assert_eq!(ar_en.direction(), Some(Direction::ArabicToEnglish));
    assert_eq!(en_ar.direction(), Some(Direction::EnglishToArabic));
    assert!(!ar_ar.is_supported());
    assert!(!en_en.is_supported());
}

#[test]
fn test_direction_pair_shouldRoundTripThroughDirection() {
    for direction in Direction::ALL {
        assert_eq!(direction.pair().direction(), Some(direction));
        assert_ne!(direction.source(), direction.target());
    }
    assert_eq!(Direction::ArabicToEnglish.to_string(), "ar-en");
    assert_eq!(Direction::EnglishToArabic.to_string(), "en-ar");
}

#[test]
fn test_languagePair_parse_shouldDisplayNames() {
    let pair = LanguagePair::parse("english", "ar").unwrap();
    assert_eq!(pair.to_string(), "English -> Arabic");
    assert!(LanguagePair::parse("en", "de").is_err());
}
