//! Built-in shooting scenarios.

use serde::Serialize;

/// A named photographic situation used to drive prompt construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Scene {
    /// Stable identifier.
    pub id: &'static str,
    /// Display name, sent to the provider.
    pub name: &'static str,
    /// SVG path data for the scene icon.
    #[serde(skip)]
    pub icon: &'static str,
}

/// Returns every scene, in display order.
pub fn scenes() -> &'static [Scene] {
    SCENES
}

/// Finds a scene by id or, failing that, by case-insensitive name.
pub fn find_scene(key: &str) -> Option<&'static Scene> {
    let key = key.trim();
    SCENES
        .iter()
        .find(|s| s.id == key)
        .or_else(|| SCENES.iter().find(|s| s.name.eq_ignore_ascii_case(key)))
}

static SCENES: &[Scene] = &[
    Scene {
        id: "portrait_outdoor_daylight",
        name: "Outdoor Portrait",
        icon: "M12 5.5A3.5 3.5 0 0 1 15.5 9a3.5 3.5 0 0 1-3.5 3.5A3.5 3.5 0 0 1 8.5 9A3.5 3.5 0 0 1 12 5.5M5 19v-2c0-2.21 3.13-4 7-4s7 1.79 7 4v2H5zm17-7h-2v-2h2v2zm-2-4l1.41-1.41-1.41-1.41L18 6.59V8h2V6.59l1.41 1.41 1.41-1.41L21.41 5.2zM18 2h-2v2h2V2z",
    },
    Scene {
        id: "portrait_indoor_lowlight",
        name: "Indoor Portrait",
        icon: "M20 18v2H4v-2c0-1.65 3.33-3 5-3 .39 0 .78.04 1.16.11A4.012 4.012 0 0 1 12 14c1.23 0 2.34.56 3.07 1.44.33-.06.66-.09 1-.09 1.67 0 5 1.35 5 3zm-8-6c2.21 0 4-1.79 4-4s-1.79-4-4-4-4 1.79-4 4 1.79 4 4 4zm8-10H4v16h16V2zm2-2H2v20h20V0z",
    },
    Scene {
        id: "night_portrait",
        name: "Night Portrait",
        icon: "M12,5.5A3.5,3.5 0 0,1 15.5,9A3.5,3.5 0 0,1 12,12.5A3.5,3.5 0 0,1 8.5,9A3.5,3.5 0 0,1 12,5.5M5,19V17C5,14.79 8.13,13 12,13C15.87,13 19,14.79 19,17V19H5M19.5,9.5L21,8L19.5,6.5L18,8L19.5,9.5M17,6L16,4L15,6L16,8L17,6M22,12L21,14L22,16L24,15L22,12Z",
    },
    Scene {
        id: "portrait_lighting",
        name: "Portrait Lighting",
        icon: "M12 5.5A3.5 3.5 0 0 1 15.5 9a3.5 3.5 0 0 1-3.5 3.5A3.5 3.5 0 0 1 8.5 9A3.5 3.5 0 0 1 12 5.5M5 19v-2c0-2.21 3.13-4 7-4s7 1.79 7 4v2H5zm14-7h-2v-2h2v2zm0 4h-2v-2h2v2zm0 4h-2v-2h2v2zM17 3v2h2V3h-2zm-2 2h-2V3h2v2z",
    },
    Scene {
        id: "landscape_daylight",
        name: "Landscape",
        icon: "M6.5,15.5L9.5,11.5L12.5,15.5L15.5,10.5L19,15.5H5.5L6.5,15.5M21,19.5H3V4.5H21V19.5Z",
    },
    Scene {
        id: "group_photo_outdoor",
        name: "Outdoor Group Photo",
        icon: "M16,13C17.66,13 19,11.66 19,10C19,8.34 17.66,7 16,7C14.34,7 13,8.34 13,10C13,11.66 14.34,13 16,13M16,14C13.33,14 8,15.33 8,18V21H24V18C24,15.33 18.67,14 16,14M8,13C9.66,13 11,11.66 11,10C11,8.34 9.66,7 8,7C6.34,7 5,8.34 5,10C5,11.66 6.34,13 8,13M8,14C7.3,14 6.62,14.07 5.97,14.21C6.91,15.27 7.5,16.5 7.5,18V21H13V18C13,15.33 12.67,14 8,14Z",
    },
    Scene {
        id: "family_portrait_indoor",
        name: "Indoor Family Photo",
        icon: "M22 10.5V19c0 1.1-.9 2-2 2H4c-1.1 0-2-.9-2-2v-8.5c0-.82.52-1.56 1.26-1.88l8-4.5c.48-.27 1.04-.27 1.52 0l8 4.5c.74.32 1.22 1.06 1.22 1.88zM12 6c-1.93 0-3.5 1.57-3.5 3.5S10.07 13 12 13s3.5-1.57 3.5-3.5S13.93 6 12 6zm-5 13c0-1.67 3.33-2.5 5-2.5s5 .83 5 2.5v1H7v-1z",
    },
    Scene {
        id: "sports_action_daylight",
        name: "Action/Sports",
        icon: "M9.5 5.5c1.1 0 2-.9 2-2s-.9-2-2-2-2 .9-2 2 .9 2 2 2zm2.5 1.5h-5c-1.1 0-2 .9-2 2v6h2v-5h1v6h2v-4h1v4h2v-6c0-1.1-.9-2-2-2z",
    },
    Scene {
        id: "street_photography",
        name: "Street Photography",
        icon: "M14.5,9.5A2.5,2.5 0 0,0 12,7A2.5,2.5 0 0,0 9.5,9.5A2.5,2.5 0 0,0 12,12A2.5,2.5 0 0,0 14.5,9.5M8,21V12.5C8,11.12 9.12,10 10.5,10H13.5C14.88,10 16,11.12 16,12.5V21H14V16H10V21H8M6,21H2V9L6,5V21M18,21V5L22,9V21H18Z",
    },
    Scene {
        id: "night_sky_astrophotography",
        name: "Night Sky",
        icon: "M12 3c-4.97 0-9 4.03-9 9s4.03 9 9 9 9-4.03 9-9c0-.46-.04-.92-.1-1.36-.98 1.37-2.58 2.26-4.4 2.26-2.67 0-4.85-2.18-4.85-4.85 0-1.82.89-3.42 2.26-4.4C12.92 3.04 12.46 3 12 3zm4.5 9.5l-1.06 1.06-1.44-1.44-1.44 1.44-1.06-1.06L12.94 13l-1.44-1.44 1.06-1.06L14 11.56l1.44-1.44 1.06 1.06L14.06 13l1.44 1.44z",
    },
    Scene {
        id: "macro_photography",
        name: "Macro Photography",
        icon: "M17.5 15c-1.2 0-2.3.5-3.1 1.3L5.8 7.7c.3-1 .2-2.1-.3-3s-1.4-1.5-2.5-1.7c-1.1-.2-2.2.2-2.8 1s-.8 1.7-.5 2.8.9 1.9 2 2.3l8.6 8.6c-.7.8-1.2 1.9-1.2 3 0 2.2 1.8 4 4 4s4-1.8 4-4-1.8-4-4-4zm-14-8c0-.6.4-1 1-1s1 .4 1 1-.4 1-1 1-1-.4-1-1zm3 3c-.6 0-1-.4-1-1s.4-1 1-1 1 .4 1 1-.4 1-1 1zm3 3c-.6 0-1-.4-1-1s.4-1 1-1 1 .4 1 1-.4 1-1 1zm-3 3c-.6 0-1-.4-1-1s.4-1 1-1 1 .4 1 1-.4 1-1 1z",
    },
    Scene {
        id: "product_photography",
        name: "Product Photography",
        icon: "M16,5V4H8V5H16M16.4,7H7.6C7.05,7 6.6,7.45 6.6,8V18.4C6.6,18.95 7.05,19.4 7.6,19.4H16.4C16.95,19.4 17.4,18.95 17.4,18.4V8C17.4,7.45 16.95,7 16.4,7Z",
    },
    Scene {
        id: "wildlife_photography",
        name: "Wildlife Photography",
        icon: "M12 2C6.48 2 2 6.48 2 12s4.48 10 10 10 10-4.48 10-10S17.52 2 12 2zm-1.5 15.5c-.83 0-1.5-.67-1.5-1.5s.67-1.5 1.5-1.5 1.5.67 1.5 1.5-.67 1.5-1.5 1.5zm3-3c-.83 0-1.5-.67-1.5-1.5s.67-1.5 1.5-1.5 1.5.67 1.5 1.5-.67 1.5-1.5 1.5zm-6 0c-.83 0-1.5-.67-1.5-1.5s.67-1.5 1.5-1.5 1.5.67 1.5 1.5-.67 1.5-1.5 1.5zm3-4.5c-1.38 0-2.5-1.12-2.5-2.5s1.12-2.5 2.5-2.5 2.5 1.12 2.5 2.5-1.12 2.5-2.5 2.5z",
    },
    Scene {
        id: "fireworks_photography",
        name: "Fireworks",
        icon: "M12 2C12 2 11 4 9 4C7 4 7 2 7 2S8 0 10 0C12 0 12 2 12 2M5.5 4.5C5.5 4.5 4.5 5.5 4.5 7.5S5.5 10.5 5.5 10.5S6.5 9.5 6.5 7.5S5.5 4.5 5.5 4.5M18.5 4.5C18.5 4.5 17.5 5.5 17.5 7.5S18.5 10.5 18.5 10.5S19.5 9.5 19.5 7.5S18.5 4.5 18.5 4.5M12 12C12 12 11 14 9 14C7 14 7 12 7 12S8 10 10 10C12 10 12 12 12 12M14 22H10V15H14V22Z",
    },
    Scene {
        id: "long_exposure",
        name: "Long Exposure",
        icon: "M13 3.05V1h-2v2.05A9 9 0 0 0 3.05 11H1v2h2.05A9 9 0 0 0 11 20.95V23h2v-2.05A9 9 0 0 0 20.95 13H23v-2h-2.05A9 9 0 0 0 13 3.05zM12 19a7 7 0 1 1 0-14 7 7 0 0 1 0 14zm1-8h2.55A5.52 5.52 0 0 0 12 6.45V9h1zm-4.45 4L9.5 13h1.05l-1.9 1.9A5.52 5.52 0 0 0 6.45 12H9v1z",
    },
    Scene {
        id: "light_painting",
        name: "Light Painting",
        icon: "M7 14c.83 0 1.5.67 1.5 1.5S7.83 17 7 17s-1.5-.67-1.5-1.5S6.17 14 7 14zm3 2c0-1.66-1.34-3-3-3s-3 1.34-3 3h2c0-.55.45-1 1-1s1 .45 1 1h2zm10.25-3.5-.71-.71c-.38-.38-.89-.59-1.42-.59H17v-2h-2v3.42l1.44 1.44c.31.32.72.54 1.16.64l.1.02c.82 0 1.5-.67 1.5-1.5 0-.25-.06-.48-.18-.69zm-1.89 3.33L17 14.42V17h-2v-4h-1.17l-1-1H11v-2h2.17l2-2H13v-2h2v1.17l4.42 4.42c.39.39.39 1.02 0 1.41zM3 14c.55 0 1 .45 1 1v2h2c.55 0 1 .45 1 1s-.45 1-1 1H4v2c0 .55-.45 1-1 1s-1-.45-1-1v-2H0c-.55 0-1-.45-1-1s.45-1 1-1h2v-2c0-.55.45-1 1-1z",
    },
    Scene {
        id: "panning_photography",
        name: "Panning",
        icon: "M8.5 14.5L4 19l1.5 1.5L10 16l-1.5-1.5zM19 4l-1.5-1.5L13 7l1.5 1.5L19 4zm-6.5 2.5l-1-1L1 15.5l1 1L12.5 6.5z",
    },
    Scene {
        id: "50mm_walkaround",
        name: "50mm Walk-around",
        icon: "M12,9A3,3 0 0,0 9,12A3,3 0 0,0 12,15A3,3 0 0,0 15,12A3,3 0 0,0 12,9M12,17A5,5 0 0,1 7,12A5,5 0 0,1 12,7A5,5 0 0,1 17,12A5,5 0 0,1 12,17M12,4A8,8 0 0,0 4,12A8,8 0 0,0 12,20A8,8 0 0,0 20,12A8,8 0 0,0 12,4Z",
    },
    Scene {
        id: "85mm_bokeh_portrait",
        name: "85mm Bokeh Portrait",
        icon: "M20 18v2H4v-2c0-1.65 3.33-3 5-3 .39 0 .78.04 1.16.11A4.012 4.012 0 0 1 12 14c1.23 0 2.34.56 3.07 1.44.33-.06.66-.09 1-.09 1.67 0 5 1.35 5 3zm-8-6c2.21 0 4-1.79 4-4s-1.79-4-4-4-4 1.79-4 4 1.79 4 4 4zm8-10H4v16h16V2zm2-2H2v20h20V0z",
    },
    Scene {
        id: "70-200mm_sports_action",
        name: "70-200mm Sports",
        icon: "M9.5 5.5c1.1 0 2-.9 2-2s-.9-2-2-2-2 .9-2 2 .9 2 2 2zm2.5 1.5h-5c-1.1 0-2 .9-2 2v6h2v-5h1v6h2v-4h1v4h2v-6c0-1.1-.9-2-2-2z",
    },
    Scene {
        id: "70-200mm_compressed_landscape",
        name: "70-200mm Landscape",
        icon: "M17,2H14L12,4H8L6,2H3A1,1 0 0,0 2,3V21A1,1 0 0,0 3,22H17A1,1 0 0,0 18,21V3A1,1 0 0,0 17,2M12.5,17A2.5,2.5 0 0,1 10,14.5A2.5,2.5 0 0,1 12.5,12A2.5,2.5 0 0,1 15,14.5A2.5,2.5 0 0,1 12.5,17M12.5,7.5A1,1 0 0,1 11.5,8.5V11.5A1,1 0 0,1 12.5,12.5A1,1 0 0,1 13.5,11.5V8.5A1,1 0 0,1 12.5,7.5M22,6V18H20V6H22Z",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_scene_ids_are_unique() {
        let ids: HashSet<_> = scenes().iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), scenes().len());
        assert_eq!(scenes().len(), 21);
    }

    #[test]
    fn test_find_scene() {
        assert_eq!(find_scene("night_sky_astrophotography").unwrap().name, "Night Sky");
        assert_eq!(find_scene("long exposure").unwrap().id, "long_exposure");
        assert!(find_scene("underwater").is_none());
    }
}
