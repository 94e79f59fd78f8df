use super::*;
use serde_json::json;

#[test]
fn strips_every_tag() {
    assert_eq!(
        strip_markup("<p>Need help <strong>securing</strong> our site.</p>\n"),
        "Need help securing our site.\n"
    );
    assert_eq!(strip_markup("no markup"), "no markup");
    assert_eq!(strip_markup("a<b<c>>d"), "a>d");
    assert_eq!(strip_markup("1 < 2 and more"), "1 < 2 and more");
}

#[test]
fn stripping_is_idempotent() {
    let samples = [
        "<p>Hello <a href=\"/x\">world</a></p>",
        "a<b<c>>d",
        "<<>>",
        "x > y < z",
        "<br/>line<br />",
        "",
    ];

    for sample in samples {
        let once = strip_markup(sample);
        assert_eq!(strip_markup(&once), once, "sample {sample:?}");
    }
}

#[test]
fn project_with_full_custom_fields_is_mapped() {
    let raw = json!([{
        "id": 31,
        "date": "2024-02-01T10:00:00",
        "title": { "rendered": "Network refresh" },
        "excerpt": { "rendered": "<p>Replace aging switches.</p>\n", "protected": false },
        "acf": {
            "organization": "Senior Community Center",
            "location": "Seattle, WA",
            "skills_needed": ["IT Support", "Network Security"],
            "urgency": "High",
            "budget": "$800-1200",
            "latitude": "47.6062",
            "longitude": -122.3321
        }
    }]);

    let projects = projects(raw).expect("normalize");
    assert_eq!(projects.len(), 1);
    let project = &projects[0];
    assert_eq!(project.id, "31");
    assert_eq!(project.title, "Network refresh");
    assert_eq!(project.organization, "Senior Community Center");
    assert_eq!(project.description, "Replace aging switches.\n");
    assert_eq!(project.skills_needed, vec!["IT Support", "Network Security"]);
    assert_eq!(project.urgency, Urgency::High);
    assert_eq!(project.budget, "$800-1200");
    assert_eq!(project.posted_date, "2024-02-01T10:00:00");
    assert_eq!(project.lat, 47.6062);
    assert!((project.lng + 122.3321).abs() < 1e-9);
}

#[test]
fn project_defaults_fill_missing_fields() {
    let raw = json!([
        { "id": 1, "title": { "rendered": "No fields" }, "excerpt": { "rendered": "" }, "acf": [] },
        { "id": "2", "title": { "rendered": "Falsy fields" }, "acf": {
            "organization": "",
            "urgency": null,
            "budget": false,
            "skills_needed": false
        } },
        { "id": 3, "title": { "rendered": "Odd urgency" }, "acf": { "urgency": "asap" } }
    ]);

    let projects = projects(raw).expect("normalize");
    for project in &projects {
        assert_eq!(project.organization, "Unknown Organization");
        assert_eq!(project.location, "Location TBD");
        assert_eq!(project.budget, "Budget TBD");
        assert_eq!(project.urgency, Urgency::Medium);
        assert!(project.skills_needed.is_empty());
        assert_eq!(project.description, "");
        assert_eq!(project.posted_date, "");
        assert_eq!((project.lat, project.lng), (0.0, 0.0));
    }
    assert_eq!(projects[1].id, "2");
}

#[test]
fn comma_separated_skills_are_split() {
    let raw = json!([{
        "id": 5,
        "title": { "rendered": "Training" },
        "acf": { "skills_needed": "Digital Training, IT Support ,," }
    }]);

    let projects = projects(raw).expect("normalize");
    assert_eq!(projects[0].skills_needed, vec!["Digital Training", "IT Support"]);
}

#[test]
fn record_without_title_is_a_decode_error() {
    let raw = json!([{ "id": 9, "acf": {} }]);
    assert!(projects(raw).is_err());
    assert!(projects(json!({ "code": "rest_no_route" })).is_err());
}

#[test]
fn steward_defaults_fill_missing_fields() {
    let raw = json!([{
        "id": 12,
        "title": { "rendered": "Jennifer Park" },
        "content": { "rendered": "<p>Certified <em>e-waste</em> specialist.</p>" },
        "acf": false
    }]);

    let stewards = tech_stewards(raw).expect("normalize");
    let steward = &stewards[0];
    assert_eq!(steward.id, "12");
    assert_eq!(steward.name, "Jennifer Park");
    assert_eq!(steward.location, "Location TBD");
    assert!(steward.specialties.is_empty());
    assert_eq!(steward.rating, 4.5);
    assert_eq!(steward.reviews_count, 0);
    assert!(!steward.verified);
    assert_eq!(steward.availability, "Contact for availability");
    assert_eq!(steward.bio, "Certified e-waste specialist.");
}

#[test]
fn steward_custom_fields_accept_strings_and_numbers() {
    let raw = json!([{
        "id": 4,
        "title": { "rendered": "David Kim" },
        "content": { "rendered": "Bridging the digital divide." },
        "acf": {
            "location": "Seattle, WA",
            "specialties": ["Digital Training", "IT Support"],
            "rating": "4.7",
            "reviews_count": "73",
            "verified": "1",
            "availability": "Available this week",
            "latitude": 47.6062,
            "longitude": "-122.3321"
        }
    }]);

    let steward = &tech_stewards(raw).expect("normalize")[0];
    assert_eq!(steward.rating, 4.7);
    assert_eq!(steward.reviews_count, 73);
    assert!(steward.verified);
    assert_eq!(steward.availability, "Available this week");
    assert_eq!(steward.lng, -122.3321);
}

#[test]
fn zero_rating_falls_back_to_default() {
    let raw = json!([{
        "id": 8,
        "title": { "rendered": "New steward" },
        "acf": { "rating": 0, "verified": true, "reviews_count": -3 }
    }]);

    let steward = &tech_stewards(raw).expect("normalize")[0];
    assert_eq!(steward.rating, 4.5);
    assert!(steward.verified);
    assert_eq!(steward.reviews_count, 0);
}
