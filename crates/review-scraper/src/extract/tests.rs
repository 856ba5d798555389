use super::*;
use crate::dom::static_html::{StaticDocument, StaticPage};
use crate::export::write_reviews;
use crate::testing::{StubNode, StubPage};

const COMPLETE_REVIEW: &str = r#"
<li class="comments__item feedback" itemprop="review">
  <div class="feedback__header">Maria K.</div>
  <meta itemprop="author" content="Maria">
  <time itemprop="datePublished" datetime="2024-05-01T10:15:00+03:00">1 May</time>
  <span class="feedback__date">1 May, 10:15</span>
  <span class="feedback__rating stars-line star5"></span>
  <p class="feedback__text j-feedback__text" itemprop="reviewBody">
    Warm and light. Pros: hood, pockets
  </p>
  <ul class="feedback__photos">
    <li class="feedback__photo"><img src="1.jpg"></li>
    <li class="feedback__photo"><img src="2.jpg"></li>
    <li class="feedback__photo"><img src="3.jpg"></li>
  </ul>
  <button class="feedback__video-btn">Play</button>
  <div class="feedback__tags">
    <span class="tag">Warm</span>
    <span class="tag">True to size</span>
  </div>
</li>
"#;

const MINIMAL_REVIEW: &str = r#"
<li class="comments__item feedback">
  <p class="feedback__text j-feedback__text">Just okay.</p>
</li>
"#;

fn page_with(reviews: &[&str]) -> String {
    format!(
        "<html><head><title>Reviews</title></head><body><ul class=\"comments__list\">{}</ul></body></html>",
        reviews.concat()
    )
}

async fn extract_all(doc: &StaticDocument) -> Vec<Review> {
    let page: StaticPage<'_> = doc.page();
    let nodes = page.find_all(selectors::REVIEW_CONTAINER).await.unwrap();
    extract_reviews(&nodes, &page).await
}

async fn extract_single(review_html: &str) -> Review {
    let doc = StaticDocument::parse(&page_with(&[review_html]));
    let mut reviews = extract_all(&doc).await;
    assert_eq!(reviews.len(), 1);
    reviews.remove(0)
}

#[tokio::test]
async fn test_complete_review() {
    let review = extract_single(COMPLETE_REVIEW).await;

    assert_eq!(review.date.as_deref(), Some("2024-05-01T10:15:00+03:00"));
    assert_eq!(review.author, "Maria");
    assert_eq!(review.text, "Warm and light. Pros: hood, pockets");
    assert_eq!(review.rating, Some(5));
    assert_eq!(review.photo_count, 3);
    assert!(review.has_video);
    assert_eq!(review.tags.as_slice(), &["Warm", "True to size"]);
}

#[tokio::test]
async fn test_minimal_review_defaults() {
    let review = extract_single(MINIMAL_REVIEW).await;

    assert_eq!(review.date, None);
    assert_eq!(review.author, "");
    assert_eq!(review.text, "Just okay.");
    assert_eq!(review.rating, None);
    assert_eq!(review.photo_count, 0);
    assert!(!review.has_video);
    assert!(review.tags.is_empty());
}

#[tokio::test]
async fn test_input_order_is_preserved() {
    let microdata_only = r#"<li itemprop="review"><p itemprop="reviewBody">second</p></li>"#;
    let doc = StaticDocument::parse(&page_with(&[COMPLETE_REVIEW, microdata_only, MINIMAL_REVIEW]));

    let reviews = extract_all(&doc).await;

    let texts: Vec<&str> = reviews.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, ["Warm and light. Pros: hood, pockets", "second", "Just okay."]);
}

#[tokio::test]
async fn test_extraction_is_repeatable() {
    let doc = StaticDocument::parse(&page_with(&[COMPLETE_REVIEW, MINIMAL_REVIEW]));

    let first = extract_all(&doc).await;
    let second = extract_all(&doc).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_rating_absent_without_rating_node() {
    let review = extract_single(r#"<li itemprop="review"><p itemprop="reviewBody">meh</p></li>"#).await;
    assert_eq!(review.rating, None);
}

#[tokio::test]
async fn test_rating_from_star_class() {
    let review = extract_single(
        r#"<li itemprop="review"><span class="feedback__rating stars-line star4"></span></li>"#,
    )
    .await;
    assert_eq!(review.rating, Some(4));
}

#[tokio::test]
async fn test_rating_node_without_star_token() {
    let review = extract_single(
        r#"<li itemprop="review"><span class="feedback__rating stars-line"></span></li>"#,
    )
    .await;
    assert_eq!(review.rating, None);
}

#[test]
fn test_parse_rating_class() {
    assert_eq!(parse_rating_class("feedback__rating stars-line star4"), Some(4));
    assert_eq!(parse_rating_class("star10"), Some(10));
    assert_eq!(parse_rating_class("stars-line"), None);
    assert_eq!(parse_rating_class(""), None);
}

#[tokio::test]
async fn test_structured_date_beats_date_class() {
    let review = extract_single(
        r#"<li itemprop="review">
             <span class="feedback__date">yesterday</span>
             <time itemprop="datePublished" datetime="2024-03-02">2 March</time>
           </li>"#,
    )
    .await;
    assert_eq!(review.date.as_deref(), Some("2024-03-02"));
}

#[tokio::test]
async fn test_date_from_meta_content() {
    let review = extract_single(
        r#"<li itemprop="review">
             <meta itemprop="datePublished" content="2023-12-31">
             <span class="feedback__date">31 December</span>
           </li>"#,
    )
    .await;
    assert_eq!(review.date.as_deref(), Some("2023-12-31"));
}

#[tokio::test]
async fn test_date_class_text() {
    let review = extract_single(
        r#"<li itemprop="review"><span class="feedback__date"> 12 June </span></li>"#,
    )
    .await;
    assert_eq!(review.date.as_deref(), Some("12 June"));
}

#[tokio::test]
async fn test_date_from_data_attribute() {
    let review = extract_single(
        r#"<li itemprop="review"><div data-date="2022-08-09">Aug</div></li>"#,
    )
    .await;
    assert_eq!(review.date.as_deref(), Some("2022-08-09"));
}

#[tokio::test]
async fn test_time_without_datetime_uses_text() {
    let review = extract_single(r#"<li itemprop="review"><time>3 days ago</time></li>"#).await;
    assert_eq!(review.date.as_deref(), Some("3 days ago"));
}

#[tokio::test]
async fn test_blank_structured_date_falls_through() {
    let review = extract_single(
        r#"<li itemprop="review">
             <time itemprop="datePublished" datetime="  ">  </time>
             <span class="feedback__date">5 July</span>
           </li>"#,
    )
    .await;
    assert_eq!(review.date.as_deref(), Some("5 July"));
}

#[tokio::test]
async fn test_page_wide_date_fallback() {
    let html = format!(
        "<html><head><meta name=\"date\" content=\"2021-01-15\"></head><body><ul>{}</ul></body></html>",
        MINIMAL_REVIEW
    );
    let doc = StaticDocument::parse(&html);

    let reviews = extract_all(&doc).await;

    assert_eq!(reviews[0].date.as_deref(), Some("2021-01-15"));
}

#[tokio::test]
async fn test_author_falls_back_to_header_then_username() {
    let header = extract_single(
        r#"<li itemprop="review"><div class="feedback__header"> Ivan </div></li>"#,
    )
    .await;
    assert_eq!(header.author, "Ivan");

    let username = extract_single(
        r#"<li itemprop="review"><span class="user-name">olga_92</span></li>"#,
    )
    .await;
    assert_eq!(username.author, "olga_92");
}

#[tokio::test]
async fn test_tags_from_all_groups_without_duplicates() {
    let review = extract_single(
        r#"<li itemprop="review">
             <div class="feedback__tags"><span class="tag">Black</span></div>
             <ul class="feedback__params">
               <li class="feedback__params-item--color">Black</li>
               <li class="feedback__params-item--gray">Size: M</li>
             </ul>
             <span class="feedback__pinned">Pinned</span>
             <span class="feedback__badge"> </span>
           </li>"#,
    )
    .await;

    assert_eq!(review.tags.as_slice(), &["Black", "Size: M", "Pinned"]);
}

#[tokio::test]
async fn test_section_keyword_fallback() {
    let review = extract_single(
        r#"<li itemprop="review"><p itemprop="reviewBody">Pros: great battery life</p></li>"#,
    )
    .await;
    assert_eq!(review.tags.as_slice(), &["Pros"]);
}

#[tokio::test]
async fn test_keyword_fallback_skipped_when_tags_exist() {
    let review = extract_single(
        r#"<li itemprop="review">
             <p itemprop="reviewBody">Pros: cheap. Cons: none</p>
             <span class="feedback__badge">Verified</span>
           </li>"#,
    )
    .await;
    assert_eq!(review.tags.as_slice(), &["Verified"]);
}

#[test]
fn test_section_keywords_case_insensitive() {
    assert_eq!(
        section_keywords("Достоинства: тёплая. недостатки: нет. COMMENT: ok. Pros - no colon"),
        vec!["Достоинства", "недостатки", "COMMENT"]
    );
    assert!(section_keywords("nothing to see").is_empty());
}

#[tokio::test]
async fn test_keyword_tags_dedup_is_case_sensitive() {
    let review = extract_single(
        r#"<li itemprop="review"><p itemprop="reviewBody">Pros: a. pros: b. Cons: c</p></li>"#,
    )
    .await;
    assert_eq!(review.tags.as_slice(), &["Pros", "pros", "Cons"]);
}

#[tokio::test]
async fn test_records_hold_invariants() {
    let doc = StaticDocument::parse(&page_with(&[COMPLETE_REVIEW, MINIMAL_REVIEW, COMPLETE_REVIEW]));

    for review in extract_all(&doc).await {
        let mut seen = std::collections::HashSet::new();
        assert!(review.tags.iter().all(|tag| seen.insert(tag.clone())));
    }
}

#[tokio::test]
async fn test_resolve_field_first_non_blank_wins() {
    let doc = StaticDocument::parse(&page_with(&[
        r#"<li itemprop="review"><span class="a"> </span><span class="b">second</span><span class="c">third</span></li>"#,
    ]));
    let page = doc.page();
    let nodes = page.find_all(selectors::REVIEW_CONTAINER).await.unwrap();
    let chain = [FieldSource::Text(".a"), FieldSource::Text(".b"), FieldSource::Text(".c")];

    assert_eq!(resolve_field(&nodes[0], &chain).await.as_deref(), Some("second"));
    assert_eq!(resolve_field(&nodes[0], &[FieldSource::Text(".missing")]).await, None);
}

#[tokio::test]
async fn test_extract_from_html_without_reviews() {
    let result = extract_from_html("<html><body><p>No reviews yet</p></body></html>").await;
    assert!(matches!(result, Err(ScrapeError::ReviewsNotFound { .. })));
}

#[tokio::test]
async fn test_extract_from_html() {
    let reviews = extract_from_html(&page_with(&[COMPLETE_REVIEW, MINIMAL_REVIEW]))
        .await
        .unwrap();
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[1].text, "Just okay.");
}

#[tokio::test]
async fn test_complete_and_minimal_reviews_export_rows() {
    let doc = StaticDocument::parse(&page_with(&[COMPLETE_REVIEW, MINIMAL_REVIEW]));
    let reviews = extract_all(&doc).await;
    let mut buf = Vec::new();

    write_reviews(&mut buf, &reviews).unwrap();

    let content = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines,
        [
            "Date Published,Author,Review Text,Rating,Photo Count,Has Video,Tags",
            "2024-05-01T10:15:00+03:00,Maria,\"Warm and light. Pros: hood, pockets\",5,3,yes,Warm|True to size",
            ",,Just okay.,,0,no,",
        ]
    );
}

#[tokio::test]
async fn test_unreadable_node_is_dropped() {
    let page = StubPage::new(Some(1));

    assert_eq!(extract_review(&StubNode::detached(), &page).await, None);

    let nodes = [StubNode::new("first"), StubNode::detached(), StubNode::new("third")];
    let reviews = extract_reviews(&nodes, &page).await;

    let texts: Vec<&str> = reviews.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, ["first", "third"]);
}

#[tokio::test]
async fn test_all_nodes_unreadable_yields_no_records() {
    let page = StubPage::new(Some(1));
    let nodes = [StubNode::detached(), StubNode::detached()];

    assert!(extract_reviews(&nodes, &page).await.is_empty());
}
