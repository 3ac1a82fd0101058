use criterion::{black_box, criterion_group, criterion_main, Criterion};
use storescrape::{enumerate_product_links, Extractor, LinkConfig};

fn product_page(filler_paragraphs: usize) -> String {
    let filler = "<p>شحن مجاني لجميع المحافظات وضمان خمس سنوات</p>".repeat(filler_paragraphs);
    format!(
        r#"<html>
<head>
    <meta property="og:title" content="تكييف شارب 1.5 حصان بارد فقط AH-A12YSE">
    <meta property="og:description" content="تكييف سبليت انفرتر بلازما كلاستر">
    <meta property="og:image" content="/uploads/sharp.jpg">
</head>
<body>
    {filler}
    <div class="price"><span class="amount">23,500</span></div>
</body>
</html>"#
    )
}

fn category_page(cards: usize) -> String {
    let items: String = (0..cards)
        .map(|i| format!(r#"<li class="product"><a href="/product/ac-{i}/">AC {i}</a></li>"#))
        .collect();
    format!("<html><body><ul class=\"products\">{items}</ul></body></html>")
}

fn bench_extract(c: &mut Criterion) {
    let extractor = Extractor::default();
    let small = product_page(10);
    let large = product_page(500);

    c.bench_function("extract_small_page", |b| {
        b.iter(|| {
            extractor
                .extract(black_box(&small), "https://shop.example.com/product/ac/")
                .unwrap()
        })
    });

    c.bench_function("extract_large_page", |b| {
        b.iter(|| {
            extractor
                .extract(black_box(&large), "https://shop.example.com/product/ac/")
                .unwrap()
        })
    });
}

fn bench_links(c: &mut Criterion) {
    let page = category_page(200);
    let config = LinkConfig::default();

    c.bench_function("enumerate_links_200_cards", |b| {
        b.iter(|| {
            enumerate_product_links(
                black_box(&page),
                "https://shop.example.com/category/split/",
                &config,
            )
        })
    });
}

criterion_group!(benches, bench_extract, bench_links);
criterion_main!(benches);
