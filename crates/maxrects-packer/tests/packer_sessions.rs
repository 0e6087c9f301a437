use maxrects_packer::prelude::*;

fn fixed_options() -> PackerOptions {
    PackerOptions::builder()
        .smart(false)
        .pot(false)
        .square(false)
        .build()
}

#[test]
fn save_load_round_trips_through_json() {
    let mut packer: MaxRectsPacker =
        MaxRectsPacker::new(64, 64, 0, fixed_options()).expect("packer");
    packer.add(Rectangle::new(40, 40));
    packer.add(Rectangle::new(40, 40));
    packer.mark_clean();
    let json = save_to_json(&packer).expect("serialize");

    let mut restored: MaxRectsPacker =
        MaxRectsPacker::new(64, 64, 0, fixed_options()).expect("packer");
    load_from_json(&mut restored, &json).expect("deserialize");

    assert_eq!(restored.bins().len(), packer.bins().len());
    for (a, b) in packer.bins().iter().zip(restored.bins().iter()) {
        assert_eq!(a.width(), b.width());
        assert_eq!(a.height(), b.height());
        assert_eq!(a.free_rects(), b.free_rects());
        assert_eq!(a.rects(), b.rects());
    }
    // Saving the restored packer reproduces the same records.
    assert_eq!(json, save_to_json(&restored).expect("serialize"));
}

#[test]
fn oversized_bins_survive_save_load() {
    let mut packer: MaxRectsPacker =
        MaxRectsPacker::new(50, 50, 0, fixed_options()).expect("packer");
    packer.add(Rectangle::new(80, 90));

    let saved = packer.save();
    let mut restored: MaxRectsPacker =
        MaxRectsPacker::new(50, 50, 0, fixed_options()).expect("packer");
    restored.load(saved);

    assert_eq!(restored.bins().len(), 1);
    let bin = &restored.bins()[0];
    assert_eq!((bin.width(), bin.height()), (80, 90));
    assert!(bin.rects()[0].is_oversized());
    assert!(bin.free_rects().is_empty());
}

#[test]
fn next_freezes_existing_bins() {
    let mut packer: MaxRectsPacker =
        MaxRectsPacker::new(100, 100, 0, fixed_options()).expect("packer");
    packer.add(Rectangle::new(10, 10));
    assert_eq!(packer.bins().len(), 1);

    assert_eq!(packer.next(), 1);
    assert_eq!(packer.current_bin_index(), 1);

    // Plenty of room in bin 0, but it no longer accepts anything.
    packer.add(Rectangle::new(10, 10));
    assert_eq!(packer.bins().len(), 2);
    assert_eq!(packer.bins()[0].rects().len(), 1);
    assert_eq!(packer.bins()[1].rects().len(), 1);
}

#[test]
fn tags_group_rectangles_into_their_own_bins() {
    let opts = PackerOptions::builder()
        .smart(false)
        .pot(false)
        .square(false)
        .tag(true)
        .build();
    let mut packer: MaxRectsPacker = MaxRectsPacker::new(100, 100, 0, opts).expect("packer");
    packer.add(Rectangle::new(10, 10).with_tag("ui"));
    packer.add(Rectangle::new(10, 10).with_tag("world"));
    packer.add(Rectangle::new(10, 10).with_tag("ui"));
    packer.add(Rectangle::new(10, 10));

    assert_eq!(packer.bins().len(), 3);
    assert_eq!(packer.bins()[0].tag(), Some("ui"));
    assert_eq!(packer.bins()[0].rects().len(), 2);
    assert_eq!(packer.bins()[1].tag(), Some("world"));
    assert_eq!(packer.bins()[1].rects().len(), 1);
    assert_eq!(packer.bins()[2].tag(), None);
    for bin in packer.bins() {
        for r in bin.rects() {
            assert_eq!(r.tag(), bin.tag());
        }
    }
}

#[test]
fn add_array_sorts_largest_edge_first() {
    let mut packer: MaxRectsPacker =
        MaxRectsPacker::new(200, 200, 0, fixed_options()).expect("packer");
    packer.add_array(vec![
        Rectangle::new(10, 50),
        Rectangle::new(60, 5),
        Rectangle::new(20, 20),
    ]);
    assert_eq!(packer.bins().len(), 1);
    let edges: Vec<u32> = packer.bins()[0]
        .rects()
        .iter()
        .map(|r| r.width().max(r.height()))
        .collect();
    assert_eq!(edges, vec![60, 50, 20]);
}

#[test]
fn add_array_sorts_by_area_when_configured() {
    let opts = PackerOptions::builder()
        .smart(false)
        .pot(false)
        .square(false)
        .logic(PackingLogic::MaxArea)
        .build();
    let mut packer: MaxRectsPacker = MaxRectsPacker::new(200, 200, 0, opts).expect("packer");
    packer.add_array(vec![
        Rectangle::new(60, 5),  // area 300, edge 60
        Rectangle::new(20, 20), // area 400, edge 20
    ]);
    let areas: Vec<u64> = packer.bins()[0].rects().iter().map(|r| r.area()).collect();
    assert_eq!(areas, vec![400, 300]);
}

#[test]
fn equal_sort_keys_fall_back_to_the_stable_key() {
    let mut packer: MaxRectsPacker =
        MaxRectsPacker::new(200, 200, 0, fixed_options()).expect("packer");
    packer.add_array(vec![
        Rectangle::new(30, 30).with_key("aaa"),
        Rectangle::new(30, 30).with_key("zzz"),
        Rectangle::new(30, 30).with_key("mmm"),
    ]);
    let keys: Vec<&str> = packer.bins()[0]
        .rects()
        .iter()
        .map(|r| r.key().unwrap())
        .collect();
    assert_eq!(keys, vec!["zzz", "mmm", "aaa"]);
}
