//! Fixed listings served when the content backend is unavailable and the
//! client runs with [`BackendUnavailablePolicy::FallbackToDemo`].
//!
//! [`BackendUnavailablePolicy::FallbackToDemo`]: crate::config::BackendUnavailablePolicy::FallbackToDemo

use shared::domain::{Project, TechSteward, Urgency};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

pub fn demo_projects() -> Vec<Project> {
    vec![
        Project {
            id: "1".into(),
            title: "Website Security Audit".into(),
            organization: "Community Food Bank".into(),
            description:
                "Need help securing our donation website and implementing SSL certificates.".into(),
            location: "San Francisco, CA".into(),
            skills_needed: strings(&["Network Security", "Website Development"]),
            urgency: Urgency::High,
            budget: "$500-1000".into(),
            posted_date: "2024-01-15".into(),
            lat: 37.7749,
            lng: -122.4194,
        },
        Project {
            id: "2".into(),
            title: "Database Migration Support".into(),
            organization: "Local Animal Shelter".into(),
            description:
                "Migrating from legacy system to cloud-based database for animal records.".into(),
            location: "Austin, TX".into(),
            skills_needed: strings(&["Database Management", "Cloud Migration"]),
            urgency: Urgency::Medium,
            budget: "$1000-2000".into(),
            posted_date: "2024-01-14".into(),
            lat: 30.2672,
            lng: -97.7431,
        },
        Project {
            id: "3".into(),
            title: "E-waste Collection Setup".into(),
            organization: "Green Community Initiative".into(),
            description: "Setting up secure e-waste collection and data destruction protocols."
                .into(),
            location: "Denver, CO".into(),
            skills_needed: strings(&["E-waste Disposal", "Data Recovery"]),
            urgency: Urgency::Low,
            budget: "$300-500".into(),
            posted_date: "2024-01-13".into(),
            lat: 39.7392,
            lng: -104.9903,
        },
        Project {
            id: "4".into(),
            title: "Digital Training Program".into(),
            organization: "Senior Community Center".into(),
            description: "Setting up digital literacy training program for seniors.".into(),
            location: "Seattle, WA".into(),
            skills_needed: strings(&["Digital Training", "IT Support"]),
            urgency: Urgency::Medium,
            budget: "$800-1200".into(),
            posted_date: "2024-01-12".into(),
            lat: 47.6062,
            lng: -122.3321,
        },
    ]
}

pub fn demo_tech_stewards() -> Vec<TechSteward> {
    vec![
        TechSteward {
            id: "1".into(),
            name: "Sarah Chen".into(),
            location: "San Francisco, CA".into(),
            specialties: strings(&["Network Security", "Cloud Migration", "IT Support"]),
            rating: 4.9,
            reviews_count: 127,
            verified: true,
            availability: "Available this week".into(),
            bio: "Veteran cybersecurity specialist with 10+ years helping nonprofits secure their digital infrastructure.".into(),
            lat: 37.7749,
            lng: -122.4194,
        },
        TechSteward {
            id: "2".into(),
            name: "Marcus Rodriguez".into(),
            location: "Austin, TX".into(),
            specialties: strings(&["Database Management", "Website Development", "Digital Training"]),
            rating: 4.8,
            reviews_count: 89,
            verified: true,
            availability: "Available next week".into(),
            bio: "Full-stack developer specializing in nonprofit database solutions and staff training.".into(),
            lat: 30.2672,
            lng: -97.7431,
        },
        TechSteward {
            id: "3".into(),
            name: "Jennifer Park".into(),
            location: "Denver, CO".into(),
            specialties: strings(&["E-waste Disposal", "Data Recovery", "IT Support"]),
            rating: 5.0,
            reviews_count: 156,
            verified: true,
            availability: "Available today".into(),
            bio: "Certified e-waste specialist focused on secure data destruction and environmental responsibility.".into(),
            lat: 39.7392,
            lng: -104.9903,
        },
        TechSteward {
            id: "4".into(),
            name: "David Kim".into(),
            location: "Seattle, WA".into(),
            specialties: strings(&["Digital Training", "Website Development", "IT Support"]),
            rating: 4.7,
            reviews_count: 73,
            verified: true,
            availability: "Available this week".into(),
            bio: "Passionate about bridging the digital divide through community education and training programs.".into(),
            lat: 47.6062,
            lng: -122.3321,
        },
    ]
}
