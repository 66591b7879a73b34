//! Integration tests for the Extractor

#[cfg(test)]
mod tests {
    use crate::{ExtractorConfig, ExtractorError, Rule, RuleSet, SupplierExtractor};
    use mandi_domain::traits::SupplierDetector;
    use mandi_domain::{Author, Category, DetectionTier, Location, Post, PostId, UserId};

    fn extractor() -> SupplierExtractor {
        SupplierExtractor::default_config().unwrap()
    }

    fn post(content: &str, category: Option<Category>) -> Post {
        Post::new(
            PostId::new(),
            content,
            category,
            Author {
                name: "Rajesh Kumar".to_string(),
                id: UserId::new("user_1"),
            },
            1_700_000_000,
            Location::new(28.6519, 77.1909, "Shop 12", "Karol Bagh", "Delhi"),
        )
    }

    #[test]
    fn test_known_brand_detected_verbatim() {
        let extractor = extractor();

        for brand in ["Green Valley Farms", "EcoWrap", "MilkCo", "Spice Palace"] {
            let content = format!("Really happy with {} this week", brand);
            let detected = extractor.detect_in(&content, None).unwrap();

            assert_eq!(detected.name, brand);
            assert_eq!(detected.confidence, 0.8);
            assert_eq!(detected.source, DetectionTier::Brand);
        }
    }

    #[test]
    fn test_brand_match_ignores_case() {
        let detected = extractor()
            .detect_in("the ecowrap bags tore easily", Some(Category::Packaging))
            .unwrap();

        assert_eq!(detected.name, "EcoWrap");
        assert_eq!(detected.source, DetectionTier::Brand);
    }

    #[test]
    fn test_direct_pattern_beats_brand() {
        let detected = extractor()
            .detect_in("Spice World oils, picked up from Ravi Kumar Store", None)
            .unwrap();

        assert_eq!(detected.name, "Ravi Kumar Store");
        assert_eq!(detected.confidence, 0.9);
        assert_eq!(detected.source, DetectionTier::Direct);
    }

    #[test]
    fn test_equal_confidence_goes_to_earlier_tier() {
        let mut config = ExtractorConfig::default();
        config.weights.direct = 0.8;
        let extractor = SupplierExtractor::new(config).unwrap();

        let detected = extractor
            .detect_in("Spice World oils, picked up from Ravi Kumar Store", None)
            .unwrap();

        assert_eq!(detected.name, "Spice World");
        assert_eq!(detected.source, DetectionTier::Brand);
    }

    #[test]
    fn test_candidates_lists_every_tier() {
        let candidates =
            extractor().candidates("Spice World oils, picked up from Ravi Kumar Store", None);

        let sources: Vec<_> = candidates.iter().map(|c| c.source).collect();
        assert_eq!(sources, vec![DetectionTier::Brand, DetectionTier::Direct]);
    }

    #[test]
    fn test_green_valley_post() {
        let detected = extractor()
            .detect(&post(
                "Got tomatoes from Green Valley Farms",
                Some(Category::Vegetables),
            ))
            .unwrap();

        assert_eq!(detected.name, "Green Valley Farms");
        assert!(detected.confidence >= 0.7);
        assert_eq!(detected.category, Some(Category::Vegetables));
    }

    #[test]
    fn test_supplier_keyword_without_suffix() {
        let detected = extractor()
            .detect_in("Supplier XYZ Traders was on time", None)
            .unwrap();

        assert_eq!(detected.name, "XYZ Traders");
        assert_eq!(detected.source, DetectionTier::Direct);
    }

    #[test]
    fn test_category_pattern_scoped_to_post_category() {
        let extractor = extractor();
        let content = "Fresh tomatoes from Ravi Kumar";

        let detected = extractor
            .detect_in(content, Some(Category::Vegetables))
            .unwrap();
        assert_eq!(detected.name, "Ravi Kumar");
        assert_eq!(detected.confidence, 0.6);
        assert_eq!(detected.source, DetectionTier::Category);

        // No category, or one without patterns, skips the tier
        assert!(extractor.detect_in(content, None).is_none());
        assert!(extractor.detect_in(content, Some(Category::Meat)).is_none());
    }

    #[test]
    fn test_dairy_pattern() {
        let detected = extractor()
            .detect_in("Great milk from Anand Dairy", Some(Category::Dairy))
            .unwrap();

        assert_eq!(detected.name, "Anand Dairy");
        assert_eq!(detected.source, DetectionTier::Category);
    }

    #[test]
    fn test_uncategorized_post_still_uses_other_tiers() {
        let detected = extractor()
            .detect(&post("Bought chicken from Sharma Store", Some(Category::Meat)))
            .unwrap();

        assert_eq!(detected.name, "Sharma Store");
        assert_eq!(detected.source, DetectionTier::Direct);
    }

    #[test]
    fn test_location_fallback() {
        let content = "Bought onions near Azadpur market today";
        let detected = extractor().detect_in(content, None).unwrap();

        assert_eq!(detected.name, "Azadpur Market");
        assert_eq!(detected.confidence, 0.4);
        assert_eq!(detected.source, DetectionTier::Location);
        assert_eq!(detected.location.as_deref(), Some("Azadpur"));

        let strict = SupplierExtractor::new(ExtractorConfig::strict()).unwrap();
        assert!(strict.detect_in(content, None).is_none());
    }

    #[test]
    fn test_location_place_checked_before_naming() {
        let extractor = extractor();
        assert!(extractor
            .detect_in("Bought onions near Ab market today", None)
            .is_none());
        assert!(extractor
            .detect_in("Bought onions near The market today", None)
            .is_none());

        // A rejected place does not hide a later acceptable one
        let detected = extractor
            .detect_in("Skipped the stall near The market, went to a shop in Azadpur market", None)
            .unwrap();
        assert_eq!(detected.name, "Azadpur Market");
    }

    #[test]
    fn test_location_needs_capitalized_place() {
        let extractor = extractor();
        assert!(extractor
            .detect_in("Bought onions near azadpur market today", None)
            .is_none());
        assert_eq!(
            extractor
                .detect_in("Bought onions NEAR Azadpur MARKET today", None)
                .unwrap()
                .name,
            "Azadpur Market"
        );
    }

    #[test]
    fn test_stop_word_candidate_discarded() {
        assert!(extractor().detect_in("Vendor Fresh was late", None).is_none());
    }

    #[test]
    fn test_short_candidate_discarded() {
        let content = "Supplier AB delivered late";
        assert!(extractor().detect_in(content, None).is_none());

        let lenient = SupplierExtractor::new(ExtractorConfig::lenient()).unwrap();
        assert_eq!(lenient.detect_in(content, None).unwrap().name, "AB");
    }

    #[test]
    fn test_no_detection() {
        let extractor = extractor();
        assert!(extractor.detect_in("Nice weather today", None).is_none());
        assert!(extractor.detect_in("", Some(Category::Oil)).is_none());
    }

    #[test]
    fn test_hint_extraction() {
        let extractor = extractor();

        assert_eq!(extractor.extract_supplier_name("bought from sharma"), "Sharma");
        assert_eq!(extractor.extract_supplier_name("Ravi delivered onions"), "Ravi");
        assert_eq!(
            extractor.extract_supplier_name("picked up at azadpur market"),
            "Azadpur"
        );
    }

    #[test]
    fn test_hint_extraction_empty() {
        let extractor = extractor();

        assert_eq!(extractor.extract_supplier_name(""), "");
        assert_eq!(extractor.extract_supplier_name("hello"), "");
        assert_eq!(extractor.extract_supplier_name("from the"), "");
        assert_eq!(extractor.extract_supplier_name("from ab"), "");
    }

    #[test]
    fn test_custom_rule_set() {
        let rules = RuleSet::from_rules(vec![
            Rule::pattern(
                DetectionTier::Direct,
                None,
                r"(?P<name>[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)\s+se\s+liya",
            )
            .unwrap(),
            Rule::brand(["Sharma Traders"]),
        ]);
        let extractor = SupplierExtractor::with_rules(ExtractorConfig::default(), rules).unwrap();

        let detected = extractor.detect_in("aaj Gupta Ji se liya", None).unwrap();
        assert_eq!(detected.name, "Gupta Ji");
        assert_eq!(detected.source, DetectionTier::Direct);

        let detected = extractor.detect_in("sharma traders ka maal", None).unwrap();
        assert_eq!(detected.name, "Sharma Traders");

        // The default English table is not consulted
        assert!(extractor
            .detect_in("Got tomatoes from Green Valley Farms", None)
            .is_none());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = ExtractorConfig::default();
        config.weights.brand = 2.0;
        assert!(matches!(
            SupplierExtractor::new(config),
            Err(ExtractorError::Config(_))
        ));

        let mut config = ExtractorConfig::default();
        config.direct_patterns.push("(?P<name>[".to_string());
        assert!(matches!(
            SupplierExtractor::new(config),
            Err(ExtractorError::InvalidPattern(_, _))
        ));
    }
}
