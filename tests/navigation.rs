use menuctl::menu::{Menu, MenuContents, MenuError, MenuNode, MenuSettings, PathIndex, TextWrapper};

fn add(menu: &mut Menu, parent: &[PathIndex], brief: &str) {
    menu.insert_child(parent, MenuContents::brief(brief), MenuSettings::default())
        .unwrap();
}

// root -> [A -> [A1, A2], B -> [B1, B2]]
fn scenario() -> Menu {
    let mut menu = Menu::new();
    add(&mut menu, &[], "A");
    add(&mut menu, &[], "B");
    add(&mut menu, &[0], "A1");
    add(&mut menu, &[0], "A2");
    add(&mut menu, &[1], "B1");
    add(&mut menu, &[1], "B2");
    menu
}

fn collect_visible(node: &MenuNode, prefix: &mut Vec<PathIndex>, out: &mut Vec<Vec<PathIndex>>) {
    for (i, child) in node.children().iter().enumerate() {
        prefix.push(i as PathIndex);
        if !child.is_hidden() {
            out.push(prefix.clone());
        }
        collect_visible(child, prefix, out);
        prefix.pop();
    }
}

fn visible(menu: &Menu) -> Vec<Vec<PathIndex>> {
    let mut out = Vec::new();
    collect_visible(menu.root(), &mut Vec::new(), &mut out);
    out
}

fn all_paths(node: &MenuNode, prefix: &mut Vec<PathIndex>, out: &mut Vec<Vec<PathIndex>>) {
    for (i, child) in node.children().iter().enumerate() {
        prefix.push(i as PathIndex);
        out.push(prefix.clone());
        all_paths(child, prefix, out);
        prefix.pop();
    }
}

#[test]
fn every_path_resolves_and_overshoot_does_not() {
    let menu = scenario();
    let mut paths = Vec::new();
    all_paths(menu.root(), &mut Vec::new(), &mut paths);
    assert_eq!(paths.len(), 6);

    for path in paths {
        let node = menu.node_at(&path).expect("valid path resolves");
        let mut overshoot = path.clone();
        overshoot.push(node.child_count() as PathIndex);
        assert!(menu.node_at(&overshoot).is_none(), "{overshoot:?}");
    }
}

#[test]
fn render_path_scenario() {
    let mut menu = scenario();
    let mut out = TextWrapper::string();
    menu.render_path(&mut out, &[0, 1]).unwrap();

    assert_eq!(out.into_inner(), "1. A\n1. A1\n2. A2\n2. B\n");
    assert_eq!(visible(&menu), vec![vec![0], vec![0, 0], vec![0, 1], vec![1]]);
}

// Every ancestor-or-self of the target plus all siblings at each level.
fn expected_visible(menu: &Menu, target: &[PathIndex]) -> Vec<Vec<PathIndex>> {
    let mut out = Vec::new();
    for depth in 0..target.len() {
        let parent = &target[..depth];
        let count = menu.node_at(parent).unwrap().child_count();
        for i in 0..count {
            let mut path = parent.to_vec();
            path.push(i as PathIndex);
            out.push(path);
        }
    }
    out.sort();
    out
}

#[test]
fn render_path_reveals_exactly_the_chain_and_siblings() {
    let mut menu = scenario();
    let mut paths = vec![Vec::new()];
    all_paths(menu.root(), &mut Vec::new(), &mut paths);

    for target in paths {
        menu.render_path(&mut TextWrapper::string(), &target).unwrap();

        let mut actual = visible(&menu);
        actual.sort();
        assert_eq!(actual, expected_visible(&menu, &target), "{target:?}");
    }
}

#[test]
fn navigate_between_top_level_entries() {
    let mut menu = scenario();
    menu.render_path(&mut TextWrapper::string(), &[0, 1]).unwrap();

    let mut out = TextWrapper::string();
    menu.navigate_to(&mut out, &[0], &[1]).unwrap();

    assert_eq!(out.into_inner(), "1. A\n2. B\n");
    assert_eq!(visible(&menu), vec![vec![0], vec![1]]);
}

#[test]
fn navigate_sideways_within_a_branch() {
    let mut menu = scenario();
    menu.render_path(&mut TextWrapper::string(), &[1, 0]).unwrap();

    let mut out = TextWrapper::string();
    menu.navigate_to(&mut out, &[1, 0], &[0, 1]).unwrap();
    assert_eq!(out.into_inner(), "1. A\n1. A1\n2. A2\n2. B\n");
}

#[test]
fn hiding_everything_leaves_nothing_to_render() {
    let mut menu = scenario();
    menu.render_path(&mut TextWrapper::string(), &[1, 1]).unwrap();
    menu.node_at_mut(&[]).unwrap().hide_subtree();

    assert!(visible(&menu).is_empty());
    let mut out = TextWrapper::string();
    menu.root().render_briefs(&mut out).unwrap();
    assert_eq!(out.into_inner(), "");
}

#[test]
fn insert_while_navigating_shows_after_next_render() {
    let mut menu = scenario();
    menu.render_path(&mut TextWrapper::string(), &[1]).unwrap();
    add(&mut menu, &[], "C");

    let mut out = TextWrapper::string();
    menu.navigate_to(&mut out, &[1], &[1]).unwrap();
    // C was created visible and sits outside the reset subtree
    assert_eq!(out.into_inner(), "1. A\n2. B\n3. C\n");
}

#[test]
fn capacity_error_names_the_parent() {
    let err = MenuError::CapacityExceeded {
        path: "2-0".to_string(),
        limit: 65535,
    };
    assert_eq!(
        err.to_string(),
        "menu entry '2-0' already holds the maximum of 65535 children"
    );
}
