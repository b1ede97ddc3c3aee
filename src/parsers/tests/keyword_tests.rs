use crate::config::IngestConfig;
use crate::parsers::keywords;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_filters_and_dedupes() {
        let config = IngestConfig::default();
        let text = "Python Python decorators, generators; which about context-managers 2024 12345";
        let result = keywords::extract(text, &config);
        assert_eq!(
            result,
            vec!["python", "decorators", "generators", "context", "managers"]
        );
    }

    #[test]
    fn test_extract_respects_max_keywords() {
        let config = IngestConfig {
            max_keywords: 2,
            ..IngestConfig::default()
        };
        let result = keywords::extract("alpha bravo charlie delta", &config);
        // "alpha" and "bravo" are exactly five characters long
        assert_eq!(result, vec!["alpha", "bravo"]);
    }

    #[test]
    fn test_extract_short_words_dropped() {
        let config = IngestConfig::default();
        assert!(keywords::extract("a an the rust code", &config).is_empty());
    }

    #[test]
    fn test_extract_custom_stopwords() {
        let config = IngestConfig {
            stopwords: vec!["Python".to_string()],
            ..IngestConfig::default()
        };
        assert_eq!(
            keywords::extract("python tutorial", &config),
            vec!["tutorial"]
        );
    }
}
