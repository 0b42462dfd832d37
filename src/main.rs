use anyhow::Result;
use camembert::Pie;

/// Renders the battery usage breakdown with the two radio slices pulled out
/// of the circle, then finalizes it as SVG and PNG in the working directory.
fn main() -> Result<()> {
    let chart = Pie::from_parts(
        ["CPU", "Mobile Network", "Wi-Fi", "Bluetooth", "Backlight"],
        [35., 30., 25., 7., 3.],
        [0., 0., 0., 0.1, 0.2],
    )?
    .with_start_angle(90.);

    chart.to_svg_file("battery-usage.svg", None)?;
    chart.to_png_file("battery-usage.png", 2., None)?;
    Ok(())
}
