use regex_phone_validator::{
    validate, Category, CategorySelector, PatternMatcher, RegionTable, ValidationOptions, ValidationResult,
};

fn table() -> &'static RegionTable {
    RegionTable::embedded().unwrap()
}

#[test]
fn test_mobile_number() {
    assert_eq!(
        table().validate("1-767", "mobile", "7672251234"),
        ValidationResult::Valid(Category::Mobile)
    );
}

#[test]
fn test_mobile_pattern_rejects_7672_34() {
    // after 7672 the mobile pattern needs [234689]5 or 7[5-7]
    assert_eq!(table().validate("1-767", "mobile", "7672345123"), ValidationResult::Invalid);
    assert_eq!(table().validate("1-767", "general", "7672345123"), ValidationResult::Valid(Category::General));
}

#[test]
fn test_non_ascii_digits_are_invalid() {
    let arabic_indic = format!("7{}", "\u{0660}".repeat(9));
    let fullwidth = "７６７２２５１２３４";
    for number in vec![arabic_indic.as_str(), fullwidth] {
        assert_eq!(table().validate("1-767", "general", number), ValidationResult::Invalid, "{}", number);
        assert_eq!(table().validate("1-767", "any", number), ValidationResult::Invalid, "{}", number);
    }
}

#[test]
fn test_mobile_shape_rejects_plausible_length() {
    assert_eq!(table().validate("1-767", "mobile", "1234567890"), ValidationResult::Invalid);
}

#[test]
fn test_emergency_numbers() {
    for number in vec!["911", "999", "333"] {
        assert_eq!(
            table().validate("1-767", "emergency", number),
            ValidationResult::Valid(Category::Emergency),
            "Should be an emergency number: {}",
            number
        );
    }
}

#[test]
fn test_emergency_quick_rejection() {
    let options = ValidationOptions::default();
    assert_eq!(table().validate("1-767", "emergency", "9111"), ValidationResult::Invalid);
    // rejected by the possible pattern already
    assert_eq!(table().is_possible("1-767", "emergency", "9111", &options), ValidationResult::Invalid);
}

#[test]
fn test_emergency_is_fully_anchored() {
    let rule = table().region("1-767").unwrap().rule(Category::Emergency).unwrap();
    for number in vec!["3330", "0911", "3339"] {
        assert!(!rule.shape().is_match(number), "Shape should reject: {}", number);
    }
}

#[test]
fn test_unknown_region() {
    assert_eq!(table().validate("9-999", "general", "5551234"), ValidationResult::UnknownRegion);
    assert_eq!(table().validate("", "general", "5551234"), ValidationResult::UnknownRegion);
    assert_eq!(table().validate(" 1-767", "general", "7672251234"), ValidationResult::UnknownRegion);
    // region is resolved before the category
    assert_eq!(table().validate("9-999", "vip", "5551234"), ValidationResult::UnknownRegion);
}

#[test]
fn test_unknown_category() {
    assert_eq!(table().validate("1-767", "vip", "5551234"), ValidationResult::UnknownCategory);
    assert_eq!(table().validate("1-767", "mobile,vip", "7672251234"), ValidationResult::UnknownCategory);
}

#[test]
fn test_category_missing_from_region_is_invalid() {
    // Iceland defines no personal numbers
    assert_eq!(table().validate("354", "personal", "6111234"), ValidationResult::Invalid);
    assert_eq!(table().validate("354", "mobile", "6111234"), ValidationResult::Valid(Category::Mobile));
}

#[test]
fn test_any_reports_first_category_in_order() {
    let table = table();
    assert_eq!(table.validate("1-767", "any", "7672251234"), ValidationResult::Valid(Category::General));
    assert_eq!(table.validate("1-767", "any", "911"), ValidationResult::Valid(Category::Emergency));
    assert_eq!(table.validate("1-767", "any", "1234567890"), ValidationResult::Invalid);
}

#[test]
fn test_category_subset() {
    let table = table();
    assert_eq!(
        table.validate("1-767", "premium,mobile", "7672251234"),
        ValidationResult::Valid(Category::Mobile)
    );
    assert_eq!(table.validate("1-767", "fixed,tollfree", "7672251234"), ValidationResult::Invalid);
}

#[test]
fn test_possible_only_screening() {
    let options = ValidationOptions::default();
    assert_eq!(
        table().is_possible("1-767", "mobile", "1234567890", &options),
        ValidationResult::Valid(Category::Mobile)
    );
    assert_eq!(table().is_possible("1-767", "mobile", "123456789", &options), ValidationResult::Invalid);
    assert_eq!(table().is_possible("9-999", "mobile", "1234567890", &options), ValidationResult::UnknownRegion);
}

#[test]
fn test_classify() {
    let options = ValidationOptions::default();
    assert_eq!(
        table().classify("1-767", "7672251234", &options),
        Some(vec![Category::General, Category::Mobile])
    );
    assert_eq!(
        table().classify("1-767", "7674201234", &options),
        Some(vec![Category::General, Category::Fixed])
    );
    assert_eq!(table().classify("1-767", "12", &options), Some(vec![]));
    assert_eq!(table().classify("9-999", "911", &options), None);
}

#[test]
fn test_formatted_and_international_input() {
    let raw = ValidationOptions::default();
    let lenient = ValidationOptions {
        strip_formatting: true,
        accept_international: true,
    };
    let formatted = vec!["+1 (767) 225-1234", "001 767 225 1234", "767.225.1234", "7672251234"];

    for number in formatted {
        assert_eq!(
            table().validate_with("1-767", "mobile", number, &lenient),
            ValidationResult::Valid(Category::Mobile),
            "Should accept: {}",
            number
        );
    }
    assert_eq!(table().validate_with("1-767", "mobile", "+1 (767) 225-1234", &raw), ValidationResult::Invalid);
    assert_eq!(table().validate_with("1-767", "mobile", "+44 7672251234", &lenient), ValidationResult::Invalid);
}

#[test]
fn test_country_alias() {
    assert_eq!(table().validate("DM", "emergency", "911"), ValidationResult::Valid(Category::Emergency));
    assert_eq!(table().validate("is", "emergency", "112"), ValidationResult::Valid(Category::Emergency));
}

#[test]
fn test_bound_validator() {
    let validator = table()
        .validator("1-767")
        .unwrap()
        .with_selector(CategorySelector::AnyOf(vec![Category::Tollfree, Category::Premium]));

    assert_eq!(validator.validate("8002123456"), ValidationResult::Valid(Category::Tollfree));
    assert_eq!(validator.validate("9002123456"), ValidationResult::Valid(Category::Premium));
    assert_eq!(validator.validate("7672251234"), ValidationResult::Invalid);
    assert!(table().validator("9-999").is_none());

    let matcher: &dyn PatternMatcher = &validator;
    assert!(matcher.matches("8552123456"));
    assert!(!matcher.matches("8551123456"));
}

#[test]
fn test_embedded_validate() {
    assert_eq!(validate("1-767", "emergency", "911").unwrap(), ValidationResult::Valid(Category::Emergency));
}

#[test]
fn test_shared_across_threads() {
    let table = table();
    let cases = vec![
        ("1-767", "mobile", "7672251234"),
        ("1-767", "any", "1234567890"),
        ("354", "fixed", "4101234"),
        ("9-999", "any", "911"),
    ];
    let expected: Vec<ValidationResult> = cases.iter().map(|(r, c, n)| table.validate(r, c, n)).collect();
    let cases = &cases;

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(move || cases.iter().map(|(r, c, n)| table.validate(r, c, n)).collect::<Vec<_>>()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
