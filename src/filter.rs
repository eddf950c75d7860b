use _model::{Dataset, RegionChoice, StoreFeature};

/// Region selection of one filterable layer.
///
/// The options are fixed when the dataset loads, so the selection is always
/// `ALL` or one of the regions that dataset contains.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionFilter {
    options: Vec<RegionChoice>,
    selected: RegionChoice,
}

impl RegionFilter {
    pub fn new(dataset: &Dataset) -> Self {
        let mut options = vec![RegionChoice::All];
        options.extend(
            dataset
                .regions()
                .into_iter()
                .map(|x| RegionChoice::Region(x.to_string())),
        );

        Self {
            options,
            selected: RegionChoice::All,
        }
    }

    pub fn options(&self) -> &[RegionChoice] {
        &self.options
    }

    pub fn selected(&self) -> &RegionChoice {
        &self.selected
    }

    pub fn accepts(&self, choice: &RegionChoice) -> bool {
        self.options.contains(choice)
    }

    /// Returns false and keeps the current selection for unknown regions.
    pub fn select(&mut self, choice: RegionChoice) -> bool {
        if !self.accepts(&choice) {
            return false;
        }
        self.selected = choice;
        true
    }

    pub fn apply<'a>(&'a self, dataset: &'a Dataset) -> impl Iterator<Item = &'a StoreFeature> {
        dataset.matching(&self.selected)
    }
}

#[cfg(test)]
mod tests {
    use _model::StoreProperties;
    use geo::Point;

    use super::*;

    fn dataset(regions: &[&str]) -> Dataset {
        Dataset::new(
            regions
                .iter()
                .enumerate()
                .map(|(i, region)| StoreFeature {
                    point: Point::new(-79.0 - i as f64 / 10.0, 43.7),
                    properties: serde_json::from_value::<StoreProperties>(
                        serde_json::json!({ "name": format!("Store {i}"), "region": region }),
                    )
                    .unwrap(),
                })
                .collect(),
        )
    }

    #[test]
    fn options_are_sorted_and_distinct() {
        let filter = RegionFilter::new(&dataset(&["East", "West", "East", ""]));
        let options: Vec<_> = filter.options().iter().map(|x| x.to_string()).collect();
        assert_eq!(options, vec!["ALL", "East", "West"]);
        assert_eq!(filter.selected(), &RegionChoice::All);
    }

    #[test]
    fn select_known_region() {
        let dataset = dataset(&["East", "West", "East", ""]);
        let mut filter = RegionFilter::new(&dataset);

        assert!(filter.select("West".parse().unwrap()));
        let names: Vec<_> = filter
            .apply(&dataset)
            .map(|x| x.properties.name.clone().unwrap())
            .collect();
        assert_eq!(names, vec!["Store 1"]);

        assert!(filter.select(RegionChoice::All));
        assert_eq!(filter.apply(&dataset).count(), 4);
    }

    #[test]
    fn ignore_unknown_region() {
        let dataset = dataset(&["East", "West"]);
        let mut filter = RegionFilter::new(&dataset);
        filter.select("East".parse().unwrap());

        assert!(!filter.select("Nonexistent".parse().unwrap()));
        assert_eq!(filter.selected().to_string(), "East");
        // blank regions never become options
        assert!(!filter.select(RegionChoice::Region(String::new())));
    }
}
