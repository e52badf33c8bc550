//! Example showing how to load features into a store and query them.
//!
//! Run with `cargo run --example city_queries`.

use carta::feature::store::FeatureStore;
use carta::feature::{Feature, SimpleFeature};
use carta::query::{ComparisonOp, Filter, Query, SortBy};
use carta_types::cartesian::{Point2d, Rect};
use carta_types::geodetic::Crs;

fn main() {
    env_logger::init();

    let store = FeatureStore::with_features(
        Crs::EPSG3857,
        [
            city("Oslo", 1_195_573.0, 8_380_038.0, 709_037),
            city("Bergen", 591_440.0, 8_470_152.0, 291_189),
            city("Trondheim", 1_154_705.0, 9_209_679.0, 212_660),
            city("Stavanger", 632_706.0, 8_277_972.0, 149_048),
        ],
    );

    let query = Query::builder()
        .filter(
            Filter::bbox(Rect::new(0.0, 8_000_000.0, 1_500_000.0, 8_500_000.0))
                .and(Filter::compare(ComparisonOp::Gt, "population", 200_000i64)),
        )
        .sort_by(SortBy::descending("population"))
        .build();

    println!("Cities in the southern bbox with population over 200k:");
    for container in store.select(&query).expect("select failed") {
        let feature = container.as_ref();
        println!(
            "  {} ({:?})",
            feature.id(),
            feature.attribute("population").expect("no population")
        );
    }
}

fn city(name: &str, x: f64, y: f64, population: i64) -> SimpleFeature {
    SimpleFeature::new(name, Point2d::new(x, y))
        .with_attribute("name", name)
        .with_attribute("population", population)
}
