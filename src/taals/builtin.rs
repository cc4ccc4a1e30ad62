// Built-in taal catalog
// Order matters: the first entry is the fallback for unknown ids

use super::types::TaalDefinition;

pub fn builtin_taals() -> Vec<TaalDefinition> {
    vec![
        TaalDefinition::new(
            "teentaal",
            "Teentaal",
            vec![4, 4, 4, 4],
            16,
            "Most common taal in Hindustani classical music, with 16 beats divided into 4 parts.",
        ),
        TaalDefinition::new(
            "ektaal",
            "Ektaal",
            vec![2, 2, 2, 2, 2, 2],
            12,
            "A 12-beat taal divided into 6 parts, used in slower compositions.",
        ),
        TaalDefinition::new(
            "jhaptaal",
            "Jhaptaal",
            vec![2, 3, 2, 3],
            10,
            "A 10-beat taal divided into 4 parts, commonly used in medium-tempo compositions.",
        ),
        TaalDefinition::new(
            "rupak",
            "Rupak Taal",
            vec![3, 2, 2],
            7,
            "A 7-beat taal divided into 3 parts, with the first beat being empty (khali).",
        ),
        TaalDefinition::new(
            "dhamar",
            "Dhamar Taal",
            vec![5, 2, 3, 4],
            14,
            "A 14-beat taal primarily used in Dhrupad and Dhamar styles.",
        ),
        TaalDefinition::new(
            "dadra",
            "Dadra Taal",
            vec![3, 3],
            6,
            "A 6-beat taal commonly used in light classical music and thumri.",
        ),
        TaalDefinition::new(
            "keherwa",
            "Keherwa Taal",
            vec![4, 4],
            8,
            "An 8-beat taal commonly used in folk and light classical music.",
        ),
        TaalDefinition::new(
            "deepchandi",
            "Deepchandi Taal",
            vec![4, 4, 4, 4, 4],
            20,
            "A 20-beat taal divided into 5 parts, often used in Dhrupad compositions.",
        ),
    ]
}
