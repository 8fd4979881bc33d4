use shibou_lens_lib::models::{
    AnalysisInput, Dimension, FeatureScore, FeatureVector, Locale, Tier,
};
use shibou_lens_lib::services::catalog::{BundledCatalog, MessageCatalog};
use shibou_lens_lib::services::detection::{
    aggregation::{
        WEIGHT_BURSTINESS, WEIGHT_EMOTION_VARIANCE, WEIGHT_LANGUAGE_COMPLEXITY,
        WEIGHT_REASONING_COMPLEXITY, WEIGHT_TEMPLATE_SIMILARITY, WEIGHT_TOPIC_ENTROPY,
    },
    overall_ai_score, Analyzer,
};
use shibou_lens_lib::AnalysisError;

const TEMPLATE_SENTENCE: &str =
    "本志望理由書では、私が貴学を志望する理由と、将来の研究計画について述べたいと思います。";

const HUMAN_ESSAY: &str = "高校二年の夏、祖父が倒れた。病院の待合室で、私は何もできずにただ座っていた。\
悔しかった。しかし、その時に声をかけてくれた看護師さんの言葉が、今でも忘れられない。\
だからこそ私は、地域医療を支える看護の道を志すようになった。\
正直に言えば、不安もある。それでも、あの日の感謝を誰かに返したいと思う。";

const SAMPLES: &[&str] = &[
    "",
    "   ",
    "a",
    "短い文。",
    TEMPLATE_SENTENCE,
    HUMAN_ESSAY,
    "The quick brown fox jumps over the lazy dog. It was not amused!",
    "！？。\n\n。。",
    "あああああああああああああああああああああああああああああ",
];

fn synthetic(lc: f64, burst: f64, topic: f64, reason: f64, emo: f64, template_raw: f64) -> FeatureVector {
    FeatureVector {
        language_complexity: FeatureScore::new(0.0, lc),
        burstiness: FeatureScore::new(0.0, burst),
        topic_entropy: FeatureScore::new(0.0, topic),
        reasoning_complexity: FeatureScore::new(0.0, reason),
        emotion_variance: FeatureScore::new(0.0, emo),
        template_similarity: FeatureScore::new(template_raw, 1.0 - template_raw),
    }
}

#[test]
fn levels_and_overall_score_stay_in_range() {
    let analyzer = Analyzer::builtin();
    for text in SAMPLES {
        let assessment = analyzer.assess(text);
        assert!(assessment.overall_ai_score <= 100, "{:?}", text);
        assert_eq!(assessment.dimensions.len(), 6);
        for dim in &assessment.dimensions {
            assert!((0.0..=1.0).contains(&dim.score), "{:?} {:?}", text, dim);
            assert!((0.0..=10.0).contains(&dim.level), "{:?} {:?}", text, dim);
            assert_eq!(dim.level, (dim.level * 10.0).round() / 10.0);
        }
    }
}

#[test]
fn dimensions_are_reported_in_fixed_order() {
    let result = Analyzer::builtin()
        .analyze(&AnalysisInput::new(HUMAN_ESSAY, "ja-JP"), BundledCatalog::shared())
        .unwrap();
    let expected: Vec<String> = Dimension::ALL
        .iter()
        .map(|d| {
            BundledCatalog::shared()
                .resolve(&shibou_lens_lib::services::detection::name_key(*d), Locale::JaJp)
                .unwrap()
        })
        .collect();
    let names: Vec<String> = result.dimensions.iter().map(|d| d.name.clone()).collect();
    assert_eq!(names, expected);
}

#[test]
fn analysis_is_deterministic() {
    let analyzer = Analyzer::builtin();
    for text in SAMPLES {
        for tag in ["ja-JP", "zh-CN"] {
            let input = AnalysisInput::new(*text, tag);
            let first = analyzer.analyze(&input, BundledCatalog::shared()).unwrap();
            let second = analyzer.analyze(&input, BundledCatalog::shared()).unwrap();
            assert_eq!(
                serde_json::to_string(&first).unwrap(),
                serde_json::to_string(&second).unwrap()
            );
        }
    }
}

#[test]
fn empty_input_falls_back_to_neutral_defaults() {
    let assessment = Analyzer::builtin().assess("");
    let f = &assessment.features;
    assert_eq!(f.burstiness.score, 0.5);
    assert_eq!(f.reasoning_complexity.score, 0.45);
    assert_eq!(f.emotion_variance.score, 0.45);
    assert_eq!(f.template_similarity.raw, 0.0);
    for dim in Dimension::ALL {
        assert!(f.get(dim).fallback, "{}", dim);
    }
    assert_eq!(assessment.overall_ai_score, 43);
}

#[test]
fn short_text_guards() {
    let analyzer = Analyzer::builtin();
    // 11 chars
    let f = analyzer.extract("これは短い文章の例です");
    assert_eq!(f.language_complexity.score, 0.5);
    assert!(!f.topic_entropy.fallback);

    let f = analyzer.extract("四文字だ");
    assert_eq!(f.language_complexity.score, 0.5);
    assert_eq!(f.topic_entropy.score, 0.5);
}

#[test]
fn template_sentence_scenario() {
    let analyzer = Analyzer::builtin();
    let assessment = analyzer.assess(TEMPLATE_SENTENCE);

    assert_eq!(assessment.features.template_similarity.raw, 1.0);
    let template = &assessment.dimensions[5];
    assert_eq!(template.dimension, Dimension::TemplateSimilarity);
    assert_eq!(template.score, 0.0);
    assert_eq!(template.level, 0.0);
    assert_eq!(template.tier, Tier::Low);

    // the full 0.15 weight is included
    let mut without = assessment.features;
    without.template_similarity = FeatureScore::new(0.0, 1.0);
    let diff = assessment.ai_likelihood - shibou_lens_lib::services::detection::ai_likelihood(&without);
    assert!((diff - WEIGHT_TEMPLATE_SIMILARITY).abs() < 1e-12);
}

#[test]
fn uniform_sentence_lengths_read_as_less_bursty() {
    let analyzer = Analyzer::builtin();
    // 4 sentences of 5 chars vs lengths 2, 8, 3, 7 with the same total
    let uniform = "今日は晴れ。".repeat(4);
    let varied = "晴れ。今日は良い天気だ。雨かも。明日は曇り予報。";
    let a = analyzer.extract(&uniform).burstiness;
    let b = analyzer.extract(varied).burstiness;
    assert_eq!(a.raw, 0.0);
    assert!(a.score < b.score);
}

#[test]
fn weighted_sum_identity_on_synthetic_vectors() {
    let cases = [
        (1.0, 1.0, 1.0, 1.0, 1.0, 0.0),
        (0.0, 0.0, 0.0, 0.0, 0.0, 1.0),
        (0.5, 0.5, 0.5, 0.45, 0.45, 0.0),
        (0.12, 0.93, 0.47, 0.61, 0.4, 0.27),
        (0.88, 0.05, 0.31, 0.99, 0.72, 0.64),
    ];
    for (lc, burst, topic, reason, emo, tpl) in cases {
        let features = synthetic(lc, burst, topic, reason, emo, tpl);
        let sum = WEIGHT_LANGUAGE_COMPLEXITY * (1.0 - lc)
            + WEIGHT_TOPIC_ENTROPY * (1.0 - topic)
            + WEIGHT_BURSTINESS * (1.0 - burst)
            + WEIGHT_TEMPLATE_SIMILARITY * tpl
            + WEIGHT_REASONING_COMPLEXITY * (1.0 - reason)
            + WEIGHT_EMOTION_VARIANCE * (1.0 - emo);
        let expected = (100.0 * sum.clamp(0.0, 1.0)).round() as u8;
        assert_eq!(overall_ai_score(&features), expected);
    }
}

#[test]
fn numeric_result_is_locale_independent() {
    let analyzer = Analyzer::builtin();
    let ja = analyzer
        .analyze(&AnalysisInput::new(HUMAN_ESSAY, "ja-JP"), BundledCatalog::shared())
        .unwrap();
    let zh = analyzer
        .analyze(&AnalysisInput::new(HUMAN_ESSAY, "zh-CN"), BundledCatalog::shared())
        .unwrap();
    let fallback = analyzer
        .analyze(&AnalysisInput::new(HUMAN_ESSAY, "en-US"), BundledCatalog::shared())
        .unwrap();

    assert_eq!(ja.overall_ai_score, zh.overall_ai_score);
    assert_eq!(ja, fallback);
    for (a, b) in ja.dimensions.iter().zip(&zh.dimensions) {
        assert_eq!(a.level, b.level);
        assert_ne!(a.name, b.name);
        assert!(!b.evaluation.is_empty());
    }
}

struct EmptyCatalog;

impl MessageCatalog for EmptyCatalog {
    fn resolve(&self, _key: &str, _locale: Locale) -> Option<String> {
        None
    }
}

#[test]
fn missing_catalog_entry_is_surfaced() {
    let err = Analyzer::builtin()
        .analyze(&AnalysisInput::new(HUMAN_ESSAY, "zh-CN"), &EmptyCatalog)
        .unwrap_err();
    assert!(matches!(err, AnalysisError::MissingLocalization { .. }));
    assert_eq!(err.kind(), "missing_localization");
}

#[test]
fn analyzer_is_shareable_across_threads() {
    let analyzer = std::sync::Arc::new(Analyzer::builtin());
    let expected = analyzer.assess(HUMAN_ESSAY);
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let analyzer = std::sync::Arc::clone(&analyzer);
            std::thread::spawn(move || analyzer.assess(HUMAN_ESSAY))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
