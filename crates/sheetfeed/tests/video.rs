use sheetfeed::video::{EmbedOptions, embed_for, embed_url, youtube_id};

#[test]
fn recognises_supported_url_shapes() {
    let cases = [
        ("https://www.youtube.com/watch?v=dQw4w9WgXcQ", "dQw4w9WgXcQ"),
        ("https://youtube.com/watch?feature=share&v=abc123", "abc123"),
        ("https://youtu.be/xyz789?si=tracking", "xyz789"),
        ("https://www.youtube.com/shorts/short01", "short01"),
        ("https://www.youtube.com/embed/emb42?rel=0", "emb42"),
        ("  https://m.youtube.com/watch?v=mobile1  ", "mobile1"),
    ];
    for (url, id) in cases {
        assert_eq!(youtube_id(url).as_deref(), Some(id), "{}", url);
    }
}

#[test]
fn rejects_other_inputs() {
    for url in [
        "",
        "not a url",
        "http://x",
        "https://vimeo.com/12345",
        "https://www.youtube.com/watch?v=",
        "https://www.youtube.com/",
        "https://youtu.be/",
    ] {
        assert_eq!(youtube_id(url), None, "{}", url);
    }
}

#[test]
fn gacha_embed_autoplays() {
    assert_eq!(
        embed_url("abc", &EmbedOptions::autoplay()),
        "https://www.youtube.com/embed/abc?autoplay=1&rel=0"
    );
}

#[test]
fn scripted_embeds_enable_the_js_api() {
    assert_eq!(
        embed_url("abc", &EmbedOptions::scripted(false)),
        "https://www.youtube.com/embed/abc?enablejsapi=1&playsinline=1&rel=0&modestbranding=1"
    );
    assert_eq!(
        embed_url("abc", &EmbedOptions::scripted(true)),
        "https://www.youtube.com/embed/abc?enablejsapi=1&playsinline=1&rel=0&modestbranding=1&mute=1"
    );
}

#[test]
fn missing_id_embeds_nothing() {
    assert_eq!(embed_url("", &EmbedOptions::autoplay()), "");
    assert_eq!(embed_for("https://example.com/", &EmbedOptions::autoplay()), "");
    assert_eq!(
        embed_for("https://youtu.be/q1", &EmbedOptions::default()),
        "https://www.youtube.com/embed/q1?rel=0"
    );
}
