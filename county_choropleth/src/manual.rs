/*!

This is the long-form manual for `county_choropleth` and `wimap`.

## Input formats

Two plain text files are needed: the county boundaries and the election results.

### Boundary file

The boundary file is read token by token (tokens are separated by spaces or line
breaks), except for the county name, which is read as a whole line.

```text
-92.888114 42.491983 -86.805415 47.080621
72

Adams
WI
4
-89.785809 43.641049
-89.598656 43.642328
-89.599357 43.982728
-89.785809 43.641049

Ashland
WI
...
```

The file starts with the bounding box of the map: minimum longitude, minimum latitude,
maximum longitude and maximum latitude. Then comes the number of counties. Each county
is made of:
- two lines that are skipped: the end of the previous line and a blank line,
- the name of the county, on its own line. It is kept as written, spaces included,
- one line that is skipped (usually the state),
- the number of points,
- the points, as `longitude latitude` pairs.

The file must contain exactly the announced number of counties and points, and end
with the last point line. Anything after it is an error, including blank lines.
The file must be valid UTF-8.

### Results file

The results file is a comma-separated file. The first line is a header and it is
skipped. Each following line holds the name of a county, then the number of votes for
the republican candidate, for the democrat candidate and for all the other candidates:

```text
County,Republican,Democrat,Other,
Adams,5976,3780,117,
Ashland,2793,4363,73,
```

Names must be written exactly as in the boundary file. Trailing empty fields are
ignored. If a county appears twice, the last line wins.

## Colors

Each county is painted with the color `rgb(R, G, B)` where `R`, `B` and `G` are the
shares of the republican, democrat and other votes, scaled to `[0, 255]` and rounded.
Counties without any vote are painted in neutral gray (`#808080`) and counties that
are missing from the results file in light gray (`#c0c0c0`). Outlines are black.
All these colors can be changed in the configuration file.

## Configuration

`wimap` can read its settings from a JSON file (`--config`). All the fields are
optional, and the command line takes precedence:

```json
{
  "mapName": "Wisconsin Voting Results",
  "boundaryFile": "WI.txt",
  "resultsFile": "WIGovernor2018.txt",
  "outputSettings": {
    "width": 500,
    "height": 500,
    "outputType": "svg",
    "outputFile": "governor2018.svg"
  },
  "renderSettings": {
    "margin": 21,
    "halfMargin": 10,
    "outlineColor": "#000000",
    "noVotesColor": "#808080",
    "missingResultsColor": "#c0c0c0"
  }
}
```

Relative file names are resolved from the directory of the configuration file.

## Outputs

- `svg` (default) an SVG document of the size of the canvas, with one filled polygon
  and one outline per county.
- `json` the draw operations themselves, for hosts that paint on their own surface.

*/
